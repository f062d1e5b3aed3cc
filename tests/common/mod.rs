//! In-memory ZIP archive builder for tests.

#![allow(dead_code)]

use flate2::Compression;
use flate2::Crc;
use flate2::write::DeflateEncoder;
use std::io::Write;
use std::path::Path;

pub enum Method {
    Stored,
    Deflate,
    /// Stored bytes labelled with an arbitrary method id
    Raw(u16),
}

pub struct Entry {
    pub name: String,
    pub data: Vec<u8>,
    pub method: Method,
    /// Override the CRC-32 written to the headers
    pub crc: Option<u32>,
    /// Override the compressed size written to the Central Directory
    pub compressed_size: Option<u32>,
}

impl Entry {
    pub fn stored(name: &str, data: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            data: data.to_vec(),
            method: Method::Stored,
            crc: None,
            compressed_size: None,
        }
    }

    pub fn deflated(name: &str, data: &[u8]) -> Self {
        Self {
            method: Method::Deflate,
            ..Self::stored(name, data)
        }
    }
}

pub fn build_zip(entries: &[Entry]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut central = Vec::new();

    for entry in entries {
        let mut crc = Crc::new();
        crc.update(&entry.data);
        let crc = entry.crc.unwrap_or(crc.sum());

        let (method, payload) = match entry.method {
            Method::Stored => (0u16, entry.data.clone()),
            Method::Deflate => {
                let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
                enc.write_all(&entry.data).unwrap();
                (8u16, enc.finish().unwrap())
            }
            Method::Raw(id) => (id, entry.data.clone()),
        };

        let lfh_offset = out.len() as u32;
        let name = entry.name.as_bytes();

        out.extend_from_slice(b"PK\x03\x04");
        out.extend_from_slice(&20u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&method.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&0x0021u16.to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(name);
        out.extend_from_slice(&payload);

        central.extend_from_slice(b"PK\x01\x02");
        central.extend_from_slice(&0x031Eu16.to_le_bytes());
        central.extend_from_slice(&20u16.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&method.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0x0021u16.to_le_bytes());
        central.extend_from_slice(&crc.to_le_bytes());
        central.extend_from_slice(
            &entry
                .compressed_size
                .unwrap_or(payload.len() as u32)
                .to_le_bytes(),
        );
        central.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
        central.extend_from_slice(&(name.len() as u16).to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&(0o100644u32 << 16).to_le_bytes());
        central.extend_from_slice(&lfh_offset.to_le_bytes());
        central.extend_from_slice(name);
    }

    let cd_offset = out.len() as u32;
    out.extend_from_slice(&central);

    out.extend_from_slice(b"PK\x05\x06");
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&(central.len() as u32).to_le_bytes());
    out.extend_from_slice(&cd_offset.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out
}

pub fn write_zip(path: &Path, entries: &[Entry]) {
    std::fs::write(path, build_zip(entries)).unwrap();
}

/// A descriptor whose first group holds `pairs`.
pub fn descriptor(pairs: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <DeploymentDescriptors xmlns=\"http://www.tibco.com/xmlns/dd\">\n\
         \x20 <name>OrderService</name>\n\
         \x20 <NameValuePairs>\n\
         \x20   <name>Global Variables</name>\n",
    );
    for (name, value) in pairs {
        xml.push_str(&format!(
            "    <NameValuePair><name>{name}</name><value>{value}</value></NameValuePair>\n"
        ));
    }
    xml.push_str("  </NameValuePairs>\n</DeploymentDescriptors>\n");
    xml
}
