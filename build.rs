use shadow_rs::BuildPattern;
use shadow_rs::ShadowBuilder;

/// Embeds build information, used by `--version`.
fn main() -> Result<(), shadow_rs::ShadowError> {
    ShadowBuilder::builder()
        .build_pattern(BuildPattern::Lazy)
        .deny_const(Default::default())
        .build()?;

    Ok(())
}
