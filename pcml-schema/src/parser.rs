//! PCML descriptor parser.
//!
//! This module reads a PCML XML document into the in-memory [`Pcml`]
//! representation. Attribute values are taken verbatim; the parser does not
//! interpret counts, lengths or types.

use crate::error::ParseError;
use crate::types::{DataDef, Pcml, ProgramDef, StructDef};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Parses a PCML descriptor from a string.
///
/// # Arguments
/// * `xml` - PCML document content
///
/// # Returns
/// Parsed descriptor or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, a required `name` attribute
/// is missing, or the document does not declare exactly one program.
pub fn parse_pcml(xml: &str) -> Result<Pcml, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut version = None;
    let mut structs = Vec::new();
    let mut program: Option<ProgramDef> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match element_name(e)?.as_str() {
                "pcml" => version = attribute(e, "version")?,
                "struct" => {
                    let mut struct_def = parse_struct_attributes(e)?;
                    struct_def.fields = parse_members(&mut reader)?;
                    structs.push(struct_def);
                }
                "program" => {
                    let mut program_def = parse_program_attributes(e)?;
                    program_def.fields = parse_members(&mut reader)?;
                    set_program(&mut program, program_def)?;
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match element_name(e)?.as_str() {
                "pcml" => version = attribute(e, "version")?,
                "struct" => structs.push(parse_struct_attributes(e)?),
                "program" => set_program(&mut program, parse_program_attributes(e)?)?,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let program = program.ok_or_else(|| ParseError::InvalidStructure {
        message: "No program element found".to_string(),
    })?;

    let mut pcml = Pcml::new(program);
    pcml.version = version;
    pcml.structs = structs;
    Ok(pcml)
}

/// Parses a PCML descriptor file, recording its file name.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_pcml_file(path: &Path) -> Result<Pcml, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    let pcml = parse_pcml(&xml)?;
    Ok(match path.file_name().and_then(|n| n.to_str()) {
        Some(file_name) => pcml.with_file_name(file_name),
        None => pcml,
    })
}

fn set_program(slot: &mut Option<ProgramDef>, program: ProgramDef) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(ParseError::duplicate("program", program.name));
    }
    *slot = Some(program);
    Ok(())
}

/// Returns the element name.
fn element_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(e.name().as_ref())?.to_string())
}

/// Returns the unescaped attribute pairs of an element, keys lowercased.
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut pairs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?.to_ascii_lowercase();
        let raw = std::str::from_utf8(&attr.value)?;
        pairs.push((key, unescape(raw)?.into_owned()));
    }
    Ok(pairs)
}

/// Returns a single attribute value.
fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, ParseError> {
    Ok(attributes(e)?
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value))
}

/// Parses the program element attributes.
fn parse_program_attributes(e: &BytesStart<'_>) -> Result<ProgramDef, ParseError> {
    let mut program = ProgramDef::default();
    let mut name = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "label" => program.label = Some(value),
            "path" => program.path = Some(value),
            "entrypoint" => program.entrypoint = Some(value),
            "parseorder" => program.parseorder = Some(value),
            "returnvalue" => program.returnvalue = Some(value),
            "threadsafe" => program.threadsafe = Some(value),
            "epccsid" => program.epccsid = Some(value),
            _ => {}
        }
    }

    program.name = name.ok_or_else(|| ParseError::missing_attr("program", "name"))?;
    Ok(program)
}

/// Parses the struct element attributes.
fn parse_struct_attributes(e: &BytesStart<'_>) -> Result<StructDef, ParseError> {
    let mut struct_def = StructDef::default();
    let mut name = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "label" => struct_def.label = Some(value),
            "outputsize" => struct_def.outputsize = Some(value),
            "offset" => struct_def.offset = Some(value),
            "offsetfrom" => struct_def.offsetfrom = Some(value),
            "minvrm" => struct_def.minvrm = Some(value),
            "maxvrm" => struct_def.maxvrm = Some(value),
            _ => {}
        }
    }

    struct_def.name = name.ok_or_else(|| ParseError::missing_attr("struct", "name"))?;
    Ok(struct_def)
}

/// Parses the data element attributes.
fn parse_data(e: &BytesStart<'_>) -> Result<DataDef, ParseError> {
    let mut data = DataDef::default();
    let mut name = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "label" => data.label = Some(value),
            "type" => data.data_type = Some(value),
            "count" => data.count = Some(value),
            "length" => data.length = Some(value),
            "completewith" => data.complete_with = Some(value),
            "usage" => data.usage = Some(value),
            "init" => data.init = Some(value),
            "precision" => data.precision = Some(value),
            "struct" => data.struct_name = Some(value),
            "ccsid" => data.ccsid = Some(value),
            "passby" => data.passby = Some(value),
            "trim" => data.trim = Some(value),
            "offset" => data.offset = Some(value),
            "offsetfrom" => data.offsetfrom = Some(value),
            "outputsize" => data.outputsize = Some(value),
            "minvrm" => data.minvrm = Some(value),
            "maxvrm" => data.maxvrm = Some(value),
            "bidistringtype" => data.bidistringtype = Some(value),
            "chartype" => data.chartype = Some(value),
            _ => {}
        }
    }

    data.name = name.ok_or_else(|| ParseError::missing_attr("data", "name"))?;
    Ok(data)
}

/// Parses the data elements of a struct or program, up to its end tag.
fn parse_members(reader: &mut Reader<&[u8]>) -> Result<Vec<DataDef>, ParseError> {
    let mut members = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) => {
                if element_name(e)? == "data" {
                    members.push(parse_data(e)?);
                }
            }
            Ok(Event::Start(ref e)) => {
                if element_name(e)? == "data" {
                    members.push(parse_data(e)?);
                }
                skip_to_end(reader)?;
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: "unexpected end of document inside record".to_string(),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(members)
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
