use std::env;
use std::path::Path;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=frontend/src");
    println!("cargo:rerun-if-changed=frontend/Cargo.toml");
    println!("cargo:rerun-if-changed=crates/gfo-converter/src");
    println!("cargo:rerun-if-env-changed=SKIP_FRONTEND_BUILD");

    if env::var("SKIP_FRONTEND_BUILD").is_ok() {
        println!("cargo:warning=Skipping frontend build as SKIP_FRONTEND_BUILD is set");
        return;
    }

    let frontend_dir = Path::new("frontend");

    // The bundle is optional for the server itself; /pkg answers 404 without it.
    let status = match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "dist",
            "--out-name",
            "gfo_frontend",
            "--no-pack",
        ])
        .current_dir(frontend_dir)
        // Must not share our target dir; this build holds its lock.
        .env_remove("CARGO_TARGET_DIR")
        .status()
    {
        Ok(status) => status,
        Err(e) => {
            println!("cargo:warning=wasm-pack not available ({}), frontend bundle not built", e);
            return;
        }
    };

    if !status.success() {
        panic!("wasm-pack build failed");
    }
}
