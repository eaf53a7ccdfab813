//! Loads generated metadata documents back into module descriptors.
//!
//! The reader accepts exactly the shape the writer produces, one module per
//! document, while tolerating comments, surrounding whitespace, and
//! descriptions split across adjacent CDATA sections.

use crate::descriptor::{ModuleDetails, ModulePropertyDetails, ModuleType};
use crate::error::{MetadataError, Result};
use camino::Utf8Path;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;

/// Parses one metadata document into a module descriptor.
///
/// # Examples
///
/// ```
/// use checkstyle_meta::{ModuleType, read_module_details};
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <checkstyle-metadata>
///     <module>
///         <filter name="MyFilter" fully-qualified-name="org.example.MyFilter" parent="Checker">
///             <description><![CDATA[Filters nothing in particular.]]></description>
///         </filter>
///     </module>
/// </checkstyle-metadata>
/// "#;
///
/// let module = read_module_details(xml)?;
/// assert_eq!(module.module_type(), ModuleType::Filter);
/// assert_eq!(module.description(), "Filters nothing in particular.");
/// # Ok::<(), checkstyle_meta::MetadataError>(())
/// ```
///
/// # Errors
///
/// Returns [`MetadataError::Malformed`] when the document does not have the
/// generated shape and [`MetadataError::UnknownModuleType`] when the module
/// element label names no known category.
pub fn read_module_details(xml: &str) -> Result<ModuleDetails> {
    let mut reader = Reader::from_str(xml);
    expect_start(&mut reader, "checkstyle-metadata")?;
    expect_start(&mut reader, "module")?;
    match next_meaningful(&mut reader)? {
        Event::Start(start) => parse_module(&mut reader, &start),
        Event::Empty(start) => module_from_attributes(&start),
        Event::Eof => Err(malformed("document ended before the module element")),
        _ => Err(malformed("expected a module element")),
    }
}

/// Reads and parses the metadata document at `path`.
///
/// # Errors
///
/// Returns [`MetadataError::Read`] when the file cannot be loaded, plus
/// every error [`read_module_details`] can produce.
pub fn read_module_details_from_path(path: &Utf8Path) -> Result<ModuleDetails> {
    let xml = fs::read_to_string(path).map_err(|source| MetadataError::Read {
        path: path.to_owned(),
        source,
    })?;
    read_module_details(&xml)
}

fn malformed(reason: impl Into<String>) -> MetadataError {
    MetadataError::Malformed {
        reason: reason.into(),
    }
}

fn parse_err(source: impl std::fmt::Display) -> MetadataError {
    MetadataError::Malformed {
        reason: source.to_string(),
    }
}

/// Returns the next event carrying structure, skipping the declaration,
/// comments, processing instructions, and whitespace-only text.
fn next_meaningful<'input>(reader: &mut Reader<&'input [u8]>) -> Result<Event<'input>> {
    loop {
        let event = reader.read_event().map_err(parse_err)?;
        match event {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Text(ref text) => {
                let text = text.unescape().map_err(parse_err)?;
                if !text.trim().is_empty() {
                    return Err(malformed(format!(
                        "unexpected text content: {}",
                        text.trim(),
                    )));
                }
            }
            other => return Ok(other),
        }
    }
}

fn expect_start<'input>(
    reader: &mut Reader<&'input [u8]>,
    name: &str,
) -> Result<BytesStart<'input>> {
    match next_meaningful(reader)? {
        Event::Start(start) if start.name().as_ref() == name.as_bytes() => Ok(start),
        Event::Start(start) => Err(malformed(format!(
            "expected <{name}>, found <{}>",
            String::from_utf8_lossy(start.name().as_ref()),
        ))),
        Event::Eof => Err(malformed(format!("expected <{name}>, found end of document"))),
        _ => Err(malformed(format!("expected <{name}>"))),
    }
}

fn module_from_attributes(start: &BytesStart<'_>) -> Result<ModuleDetails> {
    let label = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let Some(module_type) = ModuleType::from_label(&label) else {
        return Err(MetadataError::UnknownModuleType { label });
    };

    let name = required_attribute(start, "name")?;
    let fully_qualified_name = required_attribute(start, "fully-qualified-name")?;
    let parent = required_attribute(start, "parent")?;
    Ok(ModuleDetails::new(name, module_type, fully_qualified_name).with_parent(parent))
}

fn parse_module<'input>(
    reader: &mut Reader<&'input [u8]>,
    start: &BytesStart<'input>,
) -> Result<ModuleDetails> {
    let mut details = module_from_attributes(start)?;

    loop {
        match next_meaningful(reader)? {
            Event::Start(child) => match child.name().as_ref() {
                b"description" => {
                    details = details.with_description(read_text(reader, "description")?);
                }
                b"properties" => {
                    for property in parse_properties(reader)? {
                        details = details.with_property(property);
                    }
                }
                b"message-keys" => {
                    for key in parse_message_keys(reader)? {
                        details = details.with_violation_message_key(key);
                    }
                }
                other => {
                    return Err(malformed(format!(
                        "unexpected element <{}> in module body",
                        String::from_utf8_lossy(other),
                    )));
                }
            },
            Event::Empty(child) => match child.name().as_ref() {
                b"description" => details = details.with_description(""),
                b"properties" | b"message-keys" => {}
                other => {
                    return Err(malformed(format!(
                        "unexpected element <{}> in module body",
                        String::from_utf8_lossy(other),
                    )));
                }
            },
            Event::End(_) => return Ok(details),
            Event::Eof => return Err(malformed("document ended inside the module element")),
            _ => return Err(malformed("unexpected content in the module body")),
        }
    }
}

/// Concatenates the text and CDATA runs inside an element, consuming its
/// end tag. Whitespace is preserved as written.
fn read_text(reader: &mut Reader<&[u8]>, element: &str) -> Result<String> {
    let mut text = String::new();
    loop {
        match reader.read_event().map_err(parse_err)? {
            Event::Text(chunk) => text.push_str(&chunk.unescape().map_err(parse_err)?),
            Event::CData(chunk) => {
                let bytes = chunk.into_inner();
                text.push_str(&String::from_utf8_lossy(&bytes));
            }
            Event::Comment(_) => {}
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(malformed(format!("document ended inside <{element}>"))),
            _ => return Err(malformed(format!("unexpected markup inside <{element}>"))),
        }
    }
}

fn parse_properties(reader: &mut Reader<&[u8]>) -> Result<Vec<ModulePropertyDetails>> {
    let mut properties = Vec::new();
    loop {
        match next_meaningful(reader)? {
            Event::Start(start) if start.name().as_ref() == b"property" => {
                properties.push(parse_property(reader, &start)?);
            }
            Event::Empty(start) if start.name().as_ref() == b"property" => {
                properties.push(property_from_attributes(&start, String::new())?);
            }
            Event::End(_) => return Ok(properties),
            Event::Eof => return Err(malformed("document ended inside <properties>")),
            _ => return Err(malformed("unexpected content inside <properties>")),
        }
    }
}

fn parse_property<'input>(
    reader: &mut Reader<&'input [u8]>,
    start: &BytesStart<'input>,
) -> Result<ModulePropertyDetails> {
    let mut description = String::new();
    loop {
        match next_meaningful(reader)? {
            Event::Start(child) if child.name().as_ref() == b"description" => {
                description = read_text(reader, "description")?;
            }
            Event::Empty(child) if child.name().as_ref() == b"description" => {}
            Event::End(_) => return property_from_attributes(start, description),
            Event::Eof => return Err(malformed("document ended inside <property>")),
            _ => return Err(malformed("unexpected content inside <property>")),
        }
    }
}

fn property_from_attributes(
    start: &BytesStart<'_>,
    description: String,
) -> Result<ModulePropertyDetails> {
    let name = required_attribute(start, "name")?;
    let type_name = required_attribute(start, "type")?;
    let mut property = ModulePropertyDetails::new(name, type_name, description);
    if let Some(value) = optional_attribute(start, "default-value")? {
        property = property.with_default_value(value);
    }
    if let Some(value) = optional_attribute(start, "validation-type")? {
        property = property.with_validation_type(value);
    }
    Ok(property)
}

fn parse_message_keys(reader: &mut Reader<&[u8]>) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    loop {
        match next_meaningful(reader)? {
            Event::Empty(start) if start.name().as_ref() == b"message-key" => {
                keys.push(required_attribute(&start, "key")?);
            }
            Event::Start(start) if start.name().as_ref() == b"message-key" => {
                keys.push(required_attribute(&start, "key")?);
                consume_end(reader, "message-key")?;
            }
            Event::End(_) => return Ok(keys),
            Event::Eof => return Err(malformed("document ended inside <message-keys>")),
            _ => return Err(malformed("unexpected content inside <message-keys>")),
        }
    }
}

fn consume_end(reader: &mut Reader<&[u8]>, element: &str) -> Result<()> {
    match next_meaningful(reader)? {
        Event::End(_) => Ok(()),
        _ => Err(malformed(format!("expected </{element}>"))),
    }
}

fn required_attribute(start: &BytesStart<'_>, name: &str) -> Result<String> {
    optional_attribute(start, name)?.ok_or_else(|| {
        malformed(format!(
            "missing required attribute {name} on <{}>",
            String::from_utf8_lossy(start.name().as_ref()),
        ))
    })
}

fn optional_attribute(start: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    for attribute in start.attributes() {
        let attribute = attribute.map_err(parse_err)?;
        if attribute.key.as_ref() == name.as_bytes() {
            let value = attribute.unescape_value().map_err(parse_err)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
