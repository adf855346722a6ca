use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert_eq!(
        SwarmError::validation("bad stride").to_string(),
        "validation error: bad stride"
    );
    assert_eq!(
        SwarmError::raster("no glyphs").to_string(),
        "raster error: no glyphs"
    );
    assert_eq!(
        SwarmError::render("bad buffer").to_string(),
        "render error: bad buffer"
    );
}

#[test]
fn other_is_transparent_over_the_source() {
    let err: SwarmError = anyhow::anyhow!("disk full").into();
    assert_eq!(err.to_string(), "disk full");
    assert!(matches!(err, SwarmError::Other(_)));
}

#[test]
fn result_alias_propagates_with_question_mark() {
    fn inner() -> SwarmResult<u32> {
        Err(SwarmError::validation("nope"))
    }
    fn outer() -> SwarmResult<u32> {
        let v = inner()?;
        Ok(v + 1)
    }
    assert!(matches!(outer(), Err(SwarmError::Validation(_))));
}
