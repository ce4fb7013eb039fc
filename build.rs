use shadow_rs::ShadowBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // version, commit and build time for --version and /health
    ShadowBuilder::builder().build()?;
    Ok(())
}
