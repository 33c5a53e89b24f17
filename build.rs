// Build script for flutter_rust_bridge code generation
//
// Dart bindings are generated out of band with the codegen CLI:
//   flutter_rust_bridge_codegen generate
//
// The generated files are:
// - lib/bridge/api.dart (Dart bindings)
// - rust/src/bridge_generated.rs (Rust FFI glue code)

fn main() {
    // Tell cargo to rerun this build script if the bridged API changes
    println!("cargo:rerun-if-changed=src/api.rs");
    println!("cargo:rerun-if-changed=src/api/types.rs");
}
