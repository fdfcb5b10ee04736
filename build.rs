use std::io::Result;

fn main() -> Result<()> {
    // usls links the onnxruntime/coreml objects, which need the compiler-rt builtins on Apple targets
    #[cfg(any(target_os = "macos", target_os = "ios", target_os = "tvos"))]
    println!("cargo:rustc-link-arg=-fapple-link-rtlib");

    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
