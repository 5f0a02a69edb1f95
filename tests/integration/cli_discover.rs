use std::fs;

use anyhow::Result;
use tempfile::tempdir;

use crate::common::run_binary;

#[test]
fn discover_prints_matches_and_count() -> Result<()> {
    let temp = tempdir()?;
    let root = temp.path().join("solution");
    fs::create_dir_all(root.join("App").join("obj").join("Debug"))?;
    fs::create_dir_all(root.join("Lib"))?;
    fs::write(root.join("App").join("Program.cs"), "")?;
    fs::write(root.join("App").join("MainForm.Designer.cs"), "")?;
    fs::write(root.join("App").join("obj").join("Debug").join("Temp.cs"), "")?;
    fs::write(root.join("Lib").join("Util.cs"), "")?;
    fs::write(root.join("Lib").join("notes.txt"), "")?;
    let config = temp.path().join("translator.toml");
    fs::write(&config, "")?;
    let manifest = temp.path().join("cs_file_path.txt");

    let output = run_binary(&[
        "--config",
        &config.display().to_string(),
        "discover",
        &root.display().to_string(),
        "--output",
        &manifest.display().to_string(),
    ])?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("Program.cs"), "{stdout}");
    assert!(stdout.contains("Util.cs"), "{stdout}");
    assert!(!stdout.contains("Designer"), "{stdout}");
    assert!(!stdout.contains("Temp.cs"), "{stdout}");
    assert!(stdout.contains("Total number of .cs files found: 2"), "{stdout}");

    let listed = fs::read_to_string(&manifest)?;
    assert_eq!(listed.lines().count(), 2);
    Ok(())
}

#[test]
fn discover_honours_extension_override() -> Result<()> {
    let temp = tempdir()?;
    fs::write(temp.path().join("a.txt"), "")?;
    fs::write(temp.path().join("b.cs"), "")?;
    let config = temp.path().join("translator.toml");
    fs::write(&config, "")?;

    let output = run_binary(&[
        "--config",
        &config.display().to_string(),
        "discover",
        &temp.path().display().to_string(),
        "--extension",
        "txt",
    ])?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("a.txt"), "{stdout}");
    assert!(stdout.contains("Total number of .txt files found: 1"), "{stdout}");
    Ok(())
}
