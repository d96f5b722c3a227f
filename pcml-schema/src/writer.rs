//! PCML descriptor serialization.
//!
//! Writes a [`Pcml`] back to XML so it can be shipped next to the generated
//! records and re-read by the runtime at call time.

use crate::error::ParseError;
use crate::types::{DataDef, Pcml, ProgramDef, StructDef};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use std::io::{Cursor, Write};

/// Serializes a descriptor to an XML string.
///
/// # Errors
/// Returns `ParseError` if writing fails.
pub fn write_pcml(pcml: &Pcml) -> Result<String, ParseError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    write_document(&mut writer, pcml)?;
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| ParseError::Utf8(e.utf8_error()))
}

/// Serializes a descriptor into any writer.
///
/// # Errors
/// Returns `ParseError` if writing fails.
pub fn write_pcml_to<W: Write>(pcml: &Pcml, out: W) -> Result<(), ParseError> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    write_document(&mut writer, pcml)
}

fn write_document<W: Write>(writer: &mut Writer<W>, pcml: &Pcml) -> Result<(), ParseError> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("pcml");
    if let Some(version) = &pcml.version {
        root.push_attribute(("version", version.as_str()));
    }
    writer.write_event(Event::Start(root))?;

    for struct_def in &pcml.structs {
        write_struct(writer, struct_def)?;
    }
    write_program(writer, &pcml.program)?;

    writer.write_event(Event::End(BytesEnd::new("pcml")))?;
    Ok(())
}

fn write_struct<W: Write>(writer: &mut Writer<W>, struct_def: &StructDef) -> Result<(), ParseError> {
    let mut elem = BytesStart::new("struct");
    push_attributes(
        &mut elem,
        &[
            ("name", Some(&struct_def.name)),
            ("label", struct_def.label.as_ref()),
            ("outputsize", struct_def.outputsize.as_ref()),
            ("offset", struct_def.offset.as_ref()),
            ("offsetfrom", struct_def.offsetfrom.as_ref()),
            ("minvrm", struct_def.minvrm.as_ref()),
            ("maxvrm", struct_def.maxvrm.as_ref()),
        ],
    );
    write_record(writer, elem, "struct", &struct_def.fields)
}

fn write_program<W: Write>(writer: &mut Writer<W>, program: &ProgramDef) -> Result<(), ParseError> {
    let mut elem = BytesStart::new("program");
    push_attributes(
        &mut elem,
        &[
            ("name", Some(&program.name)),
            ("label", program.label.as_ref()),
            ("path", program.path.as_ref()),
            ("entrypoint", program.entrypoint.as_ref()),
            ("parseorder", program.parseorder.as_ref()),
            ("returnvalue", program.returnvalue.as_ref()),
            ("threadsafe", program.threadsafe.as_ref()),
            ("epccsid", program.epccsid.as_ref()),
        ],
    );
    write_record(writer, elem, "program", &program.fields)
}

fn write_record<W: Write>(
    writer: &mut Writer<W>,
    elem: BytesStart<'_>,
    tag: &str,
    fields: &[DataDef],
) -> Result<(), ParseError> {
    if fields.is_empty() {
        writer.write_event(Event::Empty(elem))?;
        return Ok(());
    }
    writer.write_event(Event::Start(elem))?;
    for data in fields {
        writer.write_event(Event::Empty(data_element(data)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn data_element(data: &DataDef) -> BytesStart<'static> {
    let mut elem = BytesStart::new("data");
    push_attributes(
        &mut elem,
        &[
            ("name", Some(&data.name)),
            ("label", data.label.as_ref()),
            ("type", data.data_type.as_ref()),
            ("count", data.count.as_ref()),
            ("length", data.length.as_ref()),
            ("completeWith", data.complete_with.as_ref()),
            ("usage", data.usage.as_ref()),
            ("init", data.init.as_ref()),
            ("precision", data.precision.as_ref()),
            ("struct", data.struct_name.as_ref()),
            ("ccsid", data.ccsid.as_ref()),
            ("passby", data.passby.as_ref()),
            ("trim", data.trim.as_ref()),
            ("offset", data.offset.as_ref()),
            ("offsetfrom", data.offsetfrom.as_ref()),
            ("outputsize", data.outputsize.as_ref()),
            ("minvrm", data.minvrm.as_ref()),
            ("maxvrm", data.maxvrm.as_ref()),
            ("bidistringtype", data.bidistringtype.as_ref()),
            ("chartype", data.chartype.as_ref()),
        ],
    );
    elem
}

fn push_attributes(elem: &mut BytesStart<'_>, attrs: &[(&str, Option<&String>)]) {
    for (key, value) in attrs {
        if let Some(value) = value {
            elem.push_attribute((*key, value.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pcml;

    const DESCRIPTOR: &str = r#"<pcml version="6.0">
    <struct name="home" label="Address">
        <data name="city" type="char" length="20"/>
    </struct>
    <struct name="empty"/>
    <program name="ADDR" label="Fish &amp; Chips" threadsafe="true">
        <data name="home" type="struct" struct="home" usage="input"/>
        <data name="zip" type="char" length="5" completeWith="0"/>
        <data name="amount" type="packed" length="7" precision="2" init="0"/>
    </program>
</pcml>"#;

    #[test]
    fn test_write_then_parse_preserves_descriptor() {
        let pcml = parse_pcml(DESCRIPTOR).expect("Failed to parse");
        let xml = write_pcml(&pcml).expect("Failed to write");
        let reparsed = parse_pcml(&xml).expect("Failed to reparse");

        assert_eq!(pcml, reparsed);
    }

    #[test]
    fn test_write_escapes_and_declares() {
        let pcml = parse_pcml(DESCRIPTOR).expect("Failed to parse");
        let xml = write_pcml(&pcml).expect("Failed to write");

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("Fish &amp; Chips"));
        assert!(xml.contains("completeWith=\"0\""));
        assert!(xml.contains("<struct name=\"empty\"/>"));
    }

    #[test]
    fn test_write_to_writer() {
        let pcml = parse_pcml(DESCRIPTOR).expect("Failed to parse");
        let mut out = Vec::new();
        write_pcml_to(&pcml, &mut out).expect("Failed to write");

        let xml = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(xml, write_pcml(&pcml).expect("Failed to write"));
    }
}
