use std::path::Path;
use std::process::Command;

fn run_binary() -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_verum-logo"))
        .output()
        .expect("failed to launch verum-logo");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn writes_and_overwrites_assets_logo() {
    let logo = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("logo.png");

    let first = run_binary();
    assert!(first.contains("✓ Created"));
    assert!(first.contains("logo created successfully"));
    let decoded = image::open(&logo).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (512, 512));
    let first_bytes = std::fs::read(&logo).unwrap();

    let second = run_binary();
    assert!(second.contains("✓ Created"));
    assert_eq!(std::fs::read(&logo).unwrap(), first_bytes);
}
