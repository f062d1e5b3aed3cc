//! The `TIBCO.xml` deployment descriptor found at the top of an EAR.
//!
//! Only the elements listed here are bound. Unknown elements are skipped
//! and absent ones come back as empty strings or empty lists.
//!
//! The serde binding trims text content, so name/value pairs are read in a
//! second pass over the raw events where character data is kept exactly.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

use crate::error::{ConvertError, Result};

/// Name of the document element every descriptor must have.
pub const ROOT_ELEMENT: &str = "DeploymentDescriptors";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeploymentDescriptor {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub owner: String,
    #[serde(rename = "creationDate")]
    pub creation_date: String,
    #[serde(rename = "isApplicationArchive")]
    pub is_application_archive: String,
    #[serde(rename = "DeploymentDescriptorFactory")]
    pub factories: Vec<DescriptorFactory>,
    #[serde(rename = "RepoInstance")]
    pub repo_instances: Vec<RepoInstance>,
    #[serde(rename = "NameValuePairs")]
    pub name_value_pairs: Vec<NameValuePairGroup>,
    #[serde(rename = "Modules")]
    pub modules: Vec<Module>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DescriptorFactory {
    pub name: String,
    #[serde(rename = "requiresConfiguration")]
    pub requires_configuration: String,
    #[serde(rename = "deploymentDescriptorFactoryClassName")]
    pub class_name: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepoInstance {
    #[serde(rename = "@repoinstance")]
    pub repo_instance: String,
    pub name: String,
    #[serde(rename = "requiresConfiguration")]
    pub requires_configuration: String,
    #[serde(rename = "disableConfigureAtDeployment")]
    pub disable_configure_at_deployment: String,
}

/// A named group of configuration values, e.g. "Global Variables".
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NameValuePairGroup {
    pub name: String,
    #[serde(rename = "requiresConfiguration")]
    pub requires_configuration: String,
    /// Filled by [`read_pair_groups`], not by serde.
    #[serde(skip)]
    pub pairs: Vec<NameValuePair>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct NameValuePair {
    pub name: String,
    #[serde(rename = "requiresConfiguration")]
    pub requires_configuration: String,
    pub value: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Module {
    pub name: String,
    #[serde(rename = "requiresConfiguration")]
    pub requires_configuration: String,
    #[serde(rename = "disableConfigureAtDeployment")]
    pub disable_configure_at_deployment: String,
    #[serde(rename = "pathName")]
    pub path_name: String,
}

impl DeploymentDescriptor {
    /// Parse a descriptor document.
    ///
    /// Fails on bytes that are not UTF-8, on XML that does not parse and on
    /// documents whose root element is not `DeploymentDescriptors`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ConvertError::MalformedDescriptor(format!("not UTF-8: {e}")))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        check_root(text)?;

        let mut descriptor: Self = quick_xml::de::from_str(text)
            .map_err(|e| ConvertError::MalformedDescriptor(e.to_string()))?;

        let groups = read_pair_groups(text)?;
        for (group, pairs) in descriptor.name_value_pairs.iter_mut().zip(groups) {
            group.pairs = pairs;
        }

        Ok(descriptor)
    }

    /// The first name/value-pair group, which holds the global variables.
    pub fn global_variables(&self) -> Result<&NameValuePairGroup> {
        self.name_value_pairs
            .first()
            .ok_or(ConvertError::MissingNameValuePairs)
    }
}

fn check_root(text: &str) -> Result<()> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.local_name();
                if name.as_ref() == ROOT_ELEMENT.as_bytes() {
                    return Ok(());
                }
                return Err(ConvertError::MalformedDescriptor(format!(
                    "expected root element <{ROOT_ELEMENT}>, found <{}>",
                    String::from_utf8_lossy(name.as_ref())
                )));
            }
            Ok(Event::Eof) => {
                return Err(ConvertError::MalformedDescriptor(
                    "document has no root element".to_string(),
                ));
            }
            Ok(_) => {}
            Err(e) => return Err(ConvertError::MalformedDescriptor(e.to_string())),
        }
    }
}

const GROUP_ELEMENT: &[u8] = b"NameValuePairs";
const PAIR_ELEMENT: &[u8] = b"NameValuePair";

/// Collect the `NameValuePair` children of every top-level `NameValuePairs`
/// group, keeping their character data untrimmed.
///
/// Text split by comments or CDATA sections is concatenated. A field element
/// given twice keeps its last occurrence.
fn read_pair_groups(text: &str) -> Result<Vec<Vec<NameValuePair>>> {
    let malformed = |e: quick_xml::Error| ConvertError::MalformedDescriptor(e.to_string());

    let mut reader = Reader::from_str(text);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut groups: Vec<Vec<NameValuePair>> = Vec::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                path.push(e.local_name().as_ref().to_vec());
                open_element(&path, &mut groups);
            }
            Event::Empty(e) => {
                path.push(e.local_name().as_ref().to_vec());
                open_element(&path, &mut groups);
                path.pop();
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Text(e) => {
                if let Some(field) = pair_field(&path, &mut groups) {
                    field.push_str(&e.unescape().map_err(malformed)?);
                }
            }
            Event::CData(e) => {
                if let Some(field) = pair_field(&path, &mut groups) {
                    field.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(groups)
}

fn in_pair(path: &[Vec<u8>]) -> bool {
    path.len() >= 3 && path[1] == GROUP_ELEMENT && path[2] == PAIR_ELEMENT
}

fn open_element(path: &[Vec<u8>], groups: &mut Vec<Vec<NameValuePair>>) {
    match path.len() {
        2 if path[1] == GROUP_ELEMENT => groups.push(Vec::new()),
        3 if in_pair(path) => {
            if let Some(group) = groups.last_mut() {
                group.push(NameValuePair::default());
            }
        }
        4 if in_pair(path) => {
            if let Some(field) = pair_field(path, groups) {
                field.clear();
            }
        }
        _ => {}
    }
}

/// The pair field whose element is currently open, if any.
fn pair_field<'a>(
    path: &[Vec<u8>],
    groups: &'a mut [Vec<NameValuePair>],
) -> Option<&'a mut String> {
    if path.len() != 4 || !in_pair(path) {
        return None;
    }
    let pair = groups.last_mut()?.last_mut()?;
    match path[3].as_slice() {
        b"name" => Some(&mut pair.name),
        b"value" => Some(&mut pair.value),
        b"requiresConfiguration" => Some(&mut pair.requires_configuration),
        _ => None,
    }
}
