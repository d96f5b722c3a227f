//! Module-level code generation.

use super::comment_text;
use super::records::RecordGenerator;
use crate::model::{GeneratedModule, RustType};

/// Generator for the source file of one record graph.
pub struct ModuleGenerator<'a> {
    module: &'a GeneratedModule,
    runtime_crate: &'a str,
}

impl<'a> ModuleGenerator<'a> {
    /// Creates a new module generator.
    ///
    /// `runtime_crate` is the path the generated `use` lines import from.
    #[must_use]
    pub fn new(module: &'a GeneratedModule, runtime_crate: &'a str) -> Self {
        Self {
            module,
            runtime_crate,
        }
    }

    /// Generates the complete source file.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.generate_header());
        output.push_str(&self.generate_imports());

        for record in self.module.types() {
            output.push_str(&RecordGenerator::new(self.module, record, self.runtime_crate).generate());
        }

        output
    }

    fn generate_header(&self) -> String {
        let mut output = String::new();
        let program = self
            .module
            .program()
            .map_or(self.module.name.as_str(), |p| p.source_name.as_str());
        let program = comment_text(program);

        output.push_str(&format!(
            "// Records generated from the PCML descriptor of program `{}`.\n",
            program
        ));
        output.push_str("// Do not edit by hand.\n\n");
        output
    }

    fn generate_imports(&self) -> String {
        let mut output = String::new();
        let runtime = self.runtime_crate;

        let decimal = self
            .module
            .uses(|t| matches!(t, RustType::Scalar(s) if s.is_decimal()));
        let raw = self.module.uses(|t| matches!(t, RustType::Raw));
        let core_items: Vec<&str> = [(decimal, "Decimal"), (raw, "RawElement")]
            .into_iter()
            .filter_map(|(used, name)| used.then_some(name))
            .collect();

        match core_items.as_slice() {
            [] => {}
            [single] => output.push_str(&format!("use {}::core::{};\n", runtime, single)),
            items => output.push_str(&format!(
                "use {}::core::{{{}}};\n",
                runtime,
                items.join(", ")
            )),
        }
        output.push_str(&format!("use {}::PcmlRecord;\n\n", runtime));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use pcml_schema::parse_pcml;

    const ADDRESS_PCML: &str = r#"<pcml>
    <struct name="home" label="Address">
        <data name="city" type="string"/>
    </struct>
    <program name="addr">
        <data name="home" type="struct"/>
        <data name="zip" type="string" length="5" completeWith="0" usage="input"/>
        <data name="tags" type="string" count="3"/>
        <data name="amount" type="packed" length="7" precision="2" usage="output"/>
    </program>
</pcml>"#;

    fn render(xml: &str, runtime: &str) -> String {
        let pcml = parse_pcml(xml).expect("Failed to parse");
        let module = Generator::new().generate(&pcml).expect("Failed to generate");
        ModuleGenerator::new(&module, runtime).generate()
    }

    #[test]
    fn test_generate_records() {
        let code = render(ADDRESS_PCML, "pcml");

        assert!(code.contains("use pcml::core::Decimal;\n"));
        assert!(code.contains("use pcml::PcmlRecord;\n"));

        assert!(code.contains("/// Record for struct `home`.\n"));
        assert!(code.contains("#[pcml(structure)]\npub struct Address {\n"));
        assert!(code.contains(
            "#[pcml(program(name = \"addr\", document = \"META-INF.addr\"))]\npub struct Addr {\n"
        ));

        assert!(code.contains("    #[pcml(structure)]\n    home: Address,\n"));
        assert!(code.contains(
            "    #[pcml(data(name = \"zip\", usage = \"input\", length = 5, complete_with = \"0\"))]\n    zip: String,\n"
        ));
        assert!(code.contains(
            "    #[pcml(array(name = \"tags\", size = 3, element = \"char\", usage = \"inputoutput\"))]\n    tags: Vec<String>,\n"
        ));
        assert!(code.contains("    amount: Decimal,\n"));
    }

    #[test]
    fn test_generate_constructor_and_accessors() {
        let code = render(ADDRESS_PCML, "pcml");

        assert!(code.contains("            home: Address::new(),\n"));
        assert!(code.contains("            amount: Decimal::ZERO,\n"));
        assert!(code.contains("            tags: Default::default(),\n"));

        assert!(code.contains("    pub fn zip(&self) -> &str {\n"));
        assert!(code.contains("    pub fn zip_mut(&mut self) -> &mut String {\n"));
        assert!(code.contains("    pub fn set_zip(&mut self, value: String) {\n"));
        assert!(code.contains("    pub fn tags(&self) -> &[String] {\n"));
        assert!(code.contains("    pub fn amount(&self) -> Decimal {\n        self.amount\n"));
        assert!(code.contains("    pub fn home(&self) -> &Address {\n"));
        assert!(code.contains("impl Default for Addr {\n"));
    }

    #[test]
    fn test_struct_marker_array_uses_raw_elements() {
        let xml = r#"<pcml>
            <struct name="addr"><data name="city" type="char"/></struct>
            <program name="LIST">
                <data name="addr" type="struct" count="3"/>
            </program>
        </pcml>"#;
        let code = render(xml, "pcml");

        assert!(code.contains("use pcml::core::RawElement;\n"));
        assert!(code.contains("    addr: Vec<RawElement>,\n"));
        assert!(code.contains("#[pcml(array(name = \"addr\", size = 3, usage = \"inputoutput\"))]"));
    }

    #[test]
    fn test_custom_runtime_crate() {
        let code = render(ADDRESS_PCML, "crate::rt");

        assert!(code.contains("use crate::rt::PcmlRecord;\n"));
        assert!(code.contains("#[pcml(crate = \"crate::rt\")]\n"));
        assert!(!code.contains("use pcml::"));
    }

    #[test]
    fn test_empty_program() {
        let code = render(r#"<pcml><program name="NOP"/></pcml>"#, "pcml");

        assert!(code.contains("pub struct Nop {}\n"));
        assert!(code.contains("        Self {}\n"));
        assert!(!code.contains("::core::"));
    }

    #[test]
    fn test_line_breaks_in_names_stay_inside_comments() {
        let xml = r#"<pcml>
            <struct name="s&#10;pub fn injected() {}&#10;//">
                <data name="city" type="char"/>
            </struct>
            <program name="P&#13;&#10;fn other() {}">
                <data name="s&#10;pub fn injected() {}&#10;//" type="struct"/>
            </program>
        </pcml>"#;
        let code = render(xml, "pcml");

        assert!(code.contains("/// Record for struct `s pub fn injected() {} //`.\n"));
        assert!(code.contains("// Records generated from the PCML descriptor of program `P  fn other() {}`.\n"));
        assert!(!code.lines().any(|line| line.starts_with("pub fn injected")));
        assert!(!code.lines().any(|line| line.starts_with("fn other")));
        assert!(code.contains(r#"#[pcml(program(name = "P\r\nfn other() {}""#));
    }

    #[test]
    fn test_raw_identifier_fields() {
        let xml = r#"<pcml>
            <program name="T">
                <data name="type" type="char"/>
            </program>
        </pcml>"#;
        let code = render(xml, "pcml");

        assert!(code.contains("    r#type: String,\n"));
        assert!(code.contains("    pub fn r#type(&self) -> &str {\n        &self.r#type\n"));
        assert!(code.contains("    pub fn set_type(&mut self, value: String) {\n"));
    }
}
