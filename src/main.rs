use anyhow::Context;
use verum_logo::logging::init_logging;
use verum_logo::utils::{assets_dir, file_digest, save_logo};
use verum_logo::{LOGO_SIZE, render};

fn main() -> anyhow::Result<()> {
    init_logging();

    let dir = assets_dir();
    println!("Creating professional Verum Omnis logo...");

    let logo = render(LOGO_SIZE).context("rendering logo")?;
    let path = save_logo(&logo, &dir)?;
    println!("✓ Created {}", path.display());
    println!("  sha256 {}", file_digest(&path)?);

    println!();
    println!("✅ Professional logo created successfully!");
    println!("This logo features:");
    println!("  - Shield design representing truth and verification");
    println!("  - 'VO' letters for Verum Omnis");
    println!("  - 9 dots symbolizing the 9-brain analysis system");
    println!("  - Professional color scheme matching app theme");
    Ok(())
}
