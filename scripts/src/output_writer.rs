use std::{fmt::LowerHex, fs, path::Path};

use json::JsonValue;

use crate::errors::ScriptError;

/// Where a value lives inside the output file
pub enum OutputKeys {
    /// Address of a deployed contract
    Deployment { key: &'static str },
    /// Hash of the init tx of a contract
    Init { key: &'static str },
}

/// Read a value from the output file
pub fn read_output_file(file_path: &str, key: OutputKeys) -> Result<String, ScriptError> {
    if !Path::new(file_path).exists() {
        return Err(ScriptError::JsonOutputError(format!(
            "output file {} not found",
            file_path
        )));
    }

    // Parse it's json content into objects
    let parsed_json = get_json_from_file(file_path)?;
    let value = match key {
        OutputKeys::Deployment { key } => &parsed_json[key]["deploy"],
        OutputKeys::Init { key } => &parsed_json[key]["init"],
    };

    value
        .as_str()
        .map(String::from)
        .ok_or(ScriptError::JsonOutputError(String::from(
            "key missing from output file",
        )))
}

/// Writes the given value, as `0x` prefixed hex, under `key`
pub fn write_output_file<T: LowerHex>(
    file_path: &str,
    key: OutputKeys,
    value: T,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, create it
    if !Path::new(file_path).exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;
    }

    // Parse it's json content into objects
    let mut parsed_json = get_json_from_file(file_path)?;

    // Update the right key
    match key {
        OutputKeys::Deployment { key } => {
            parsed_json[key]["deploy"] = JsonValue::String(format!("{value:#x}"))
        }
        OutputKeys::Init { key } => {
            parsed_json[key]["init"] = JsonValue::String(format!("{value:#x}"))
        }
    };

    // Write the updated json back to the file
    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    Ok(())
}

/// Parses the JSON file at the given path
fn get_json_from_file(file_path: &str) -> Result<JsonValue, ScriptError> {
    let file_contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::JsonOutputError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use alloy::primitives::{address, b256};

    use super::*;

    /// A fresh output file path for the given test
    fn temp_output(name: &str) -> String {
        let path = env::temp_dir().join(format!("kipu-output-{}-{}.json", process::id(), name));
        let _ = fs::remove_file(&path);
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn writes_then_reads_deployment() {
        let file = temp_output("deployment");
        let deployed = address!("a51c1fc2f0d1a1b8494ed1fe312d7c3a78ed91c0");
        let init_tx = b256!("00000000000000000000000000000000000000000000000000000000000000ff");

        write_output_file(&file, OutputKeys::Deployment { key: "kipu_bank" }, deployed).unwrap();
        write_output_file(&file, OutputKeys::Init { key: "kipu_bank" }, init_tx).unwrap();

        assert_eq!(
            read_output_file(&file, OutputKeys::Deployment { key: "kipu_bank" }).unwrap(),
            "0xa51c1fc2f0d1a1b8494ed1fe312d7c3a78ed91c0"
        );
        assert_eq!(
            read_output_file(&file, OutputKeys::Init { key: "kipu_bank" }).unwrap(),
            format!("{init_tx:#x}")
        );

        fs::remove_file(&file).unwrap();
    }

    #[test]
    fn redeploy_overwrites_previous_address() {
        let file = temp_output("redeploy");
        let key = || OutputKeys::Deployment { key: "kipu_bank" };

        write_output_file(
            &file,
            key(),
            address!("1111111111111111111111111111111111111111"),
        )
        .unwrap();
        write_output_file(
            &file,
            key(),
            address!("2222222222222222222222222222222222222222"),
        )
        .unwrap();

        assert_eq!(
            read_output_file(&file, key()).unwrap(),
            "0x2222222222222222222222222222222222222222"
        );

        fs::remove_file(&file).unwrap();
    }

    #[test]
    fn missing_file_or_key_is_an_error() {
        let file = temp_output("missing");
        assert!(matches!(
            read_output_file(&file, OutputKeys::Deployment { key: "kipu_bank" }),
            Err(ScriptError::JsonOutputError(_))
        ));

        write_output_file(&file, OutputKeys::Deployment { key: "kipu_bank" }, 1u8).unwrap();
        assert!(matches!(
            read_output_file(&file, OutputKeys::Init { key: "kipu_bank" }),
            Err(ScriptError::JsonOutputError(_))
        ));

        fs::remove_file(&file).unwrap();
    }
}
