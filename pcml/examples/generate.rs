//! Example generating records from a PCML descriptor.
//!
//! Run with: `cargo run --example generate -- <descriptor.pcml> [output dir]`
//!
//! Without arguments a built-in address lookup descriptor is used and the
//! generated source is printed. Set `RUST_LOG=debug` to follow both passes.

use pcml::prelude::*;
use std::path::PathBuf;

const ADDRESS_PCML: &str = r#"<pcml version="4.0">
    <struct name="home" label="Address">
        <data name="street" type="char" length="30"/>
        <data name="city" type="char" length="20"/>
    </struct>
    <program name="ADDRLKP" label="Address Lookup" path="/QSYS.LIB/MYLIB.LIB/ADDRLKP.PGM">
        <data name="CUSNO" label="customerNumber" type="zoned" length="7" precision="0" usage="input"/>
        <data name="home" type="struct" struct="home" usage="output"/>
        <data name="ZIP" label="zipCode" type="char" length="5" completeWith="0" usage="output"/>
        <data name="PHONES" label="phones" type="char" length="15" count="3" usage="output"/>
    </program>
</pcml>"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let pcml = match args.next() {
        Some(path) => parse_pcml_file(&PathBuf::from(path))?,
        None => parse_pcml(ADDRESS_PCML)?,
    };

    let artifact = Generator::builder().strict(true).build().generate_artifact(&pcml)?;

    match args.next() {
        Some(out_dir) => {
            for path in artifact.write_to(&PathBuf::from(out_dir))? {
                println!("wrote {}", path.display());
            }
        }
        None => {
            for (path, source) in artifact.sources() {
                println!("// ---- {} ----", path);
                println!("{}", source);
            }
            for path in artifact.resources().keys() {
                println!("// resource: {}", path);
            }
        }
    }

    Ok(())
}
