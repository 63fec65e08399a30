use enumtab_codegen::CodeGenerator;
use std::env;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let mut codegen = CodeGenerator::new();

    codegen.set_header(
        "Generated accessors for enumtab-example\n\
         These match the newtypes in src/codes.rs",
    );

    // Automatically extract all newtypes annotated with #[derive(Enumtab)]
    codegen
        .add_source_file(manifest_dir.join("src/codes.rs"))
        .expect("Failed to parse source file");

    codegen
        .write_to_file(out_dir.join("codes_enumtab.rs"))
        .expect("Failed to write accessors");

    println!("cargo:rerun-if-changed=src/codes.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
