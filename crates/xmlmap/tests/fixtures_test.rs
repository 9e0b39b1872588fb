use std::fs;
use xmlmap::{from_str, Document};

#[test]
fn test_valid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let valid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid");
    for entry in fs::read_dir(valid_dir)? {
        let entry = entry?;
        let path = entry.path();
        let content = fs::read_to_string(&path)?;
        if from_str(&content).is_err() {
            return Err(
                std::io::Error::other(format!("Failed to parse valid file: {path:?}")).into(),
            );
        }
    }
    Ok(())
}

#[test]
fn test_valid_fixtures_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let valid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/valid");
    for entry in fs::read_dir(valid_dir)? {
        let path = entry?.path();
        let first = Document::parse_str(&fs::read_to_string(&path)?)?;
        let output = first.to_xml()?;
        let second = Document::parse_str(&output)?;
        // a generated declaration shows up as a PI once reparsed
        if second.tree() != first.tree()
            || second.doctypes() != first.doctypes()
            || second.to_xml()? != output
        {
            return Err(
                std::io::Error::other(format!("Round trip changed document: {path:?}")).into(),
            );
        }
    }
    Ok(())
}

#[test]
fn test_invalid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let invalid_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid");
    for entry in fs::read_dir(invalid_dir)? {
        let entry = entry?;
        let path = entry.path();
        let content = fs::read_to_string(&path)?;
        if from_str(&content).is_ok() {
            return Err(std::io::Error::other(format!(
                "Should fail to parse invalid file: {path:?}"
            ))
            .into());
        }
    }
    Ok(())
}
