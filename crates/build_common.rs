// Shared build script helper that turns a crate README into crate-level rustdoc.
// Include this in build.rs files with: include!("../build_common.rs");
//
// Required imports in the including file:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Copy the crate's README.md into `OUT_DIR/README_GENERATED.md` for rustdoc.
///
/// Links into `src/` are rewritten to module links (`](src/resolve.rs)` becomes
/// `](resolve)`). A crate without a README gets an empty doc file so that
/// `include_str!` in `lib.rs` still resolves.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");

    let readme_path = Path::new(crate_dir).join("README.md");
    let content = fs::read_to_string(&readme_path).unwrap_or_default();

    let rustdoc_content = content.replace("](src/", "](").replace(".rs)", ")");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");
    fs::write(dest_path, rustdoc_content).expect("failed to write README_GENERATED.md");
}
