use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{constants::WASM_TARGET_TRIPLE, errors::ScriptError, utils::command_success_or};

/// Builds a contract package of the workspace into an optimized WASM file
pub struct WasmBuilder;
impl WasmBuilder {
    /// Full build of the specified `contract_package`
    pub fn build_wasm(&self, contract_package: &str) -> Result<PathBuf, ScriptError> {
        let workspace_path = workspace_path()?;

        // Build the initial wasm file
        let wasm_file_path = self.build_initial_wasm(&workspace_path, contract_package)?;

        // Build the optimized wasm file
        let opt_wasm_file_path = self.build_opt_wasm(&wasm_file_path)?;

        // Output the resulting wasm file
        Ok(opt_wasm_file_path)
    }

    /// Build the initial wasm file
    fn build_initial_wasm(
        &self,
        workspace_path: &Path,
        contract_package: &str,
    ) -> Result<PathBuf, ScriptError> {
        let mut build_cmd = Command::new("cargo");
        build_cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        // Set the working directory to the workspace root
        build_cmd.current_dir(workspace_path);
        // Invoke the build command
        build_cmd.arg("build");
        // Use the release profile
        build_cmd.arg("-r");
        // Build the contract package
        build_cmd.arg("-p");
        build_cmd.arg(contract_package);
        // Set the build target to WASM
        build_cmd.arg("--target");
        build_cmd.arg(WASM_TARGET_TRIPLE);
        // Set the Z flags, used to optimize the resulting binary size.
        build_cmd.args([
            "-Z",
            "unstable-options",
            "-Z",
            "build-std=std,panic_abort",
            "-Z",
            "build-std-features=panic_immediate_abort",
        ]);

        // Set aggressive optimisation flags, for the child process only
        build_cmd.env("RUSTFLAGS", "-C opt-level=3");
        command_success_or(
            build_cmd,
            "Failed to build contract WASM",
            ScriptError::ContractCompilation,
        )?;

        let wasm_file_path = wasm_artifact_path(workspace_path, contract_package);
        if !wasm_file_path.exists() {
            return Err(ScriptError::ContractCompilation(format!(
                "Could not find contract WASM file at {}",
                wasm_file_path.display()
            )));
        }

        Ok(wasm_file_path)
    }

    /// Build the optimized wasm file
    fn build_opt_wasm(&self, wasm_file_path: &Path) -> Result<PathBuf, ScriptError> {
        let opt_wasm_file_path = wasm_file_path.with_extension("wasm.opt");

        let mut opt_cmd = Command::new("wasm-opt");
        opt_cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        opt_cmd.arg(wasm_file_path);
        opt_cmd.arg("-o");
        opt_cmd.arg(&opt_wasm_file_path);
        opt_cmd.arg("-O4"); // Aggressive optimization flag

        command_success_or(
            opt_cmd,
            "Failed to optimize contract WASM",
            ScriptError::ContractCompilation,
        )?;

        Ok(opt_wasm_file_path)
    }
}

/// The root of the contracts workspace, parent of this crate
fn workspace_path() -> Result<PathBuf, ScriptError> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .ok_or(ScriptError::ContractCompilation(String::from(
            "Could not find contracts workspace directory",
        )))
}

/// Where cargo puts the release WASM of `contract_package`
fn wasm_artifact_path(workspace_path: &Path, contract_package: &str) -> PathBuf {
    workspace_path
        .join("target")
        .join(WASM_TARGET_TRIPLE)
        .join("release")
        .join(format!("{}.wasm", contract_package.replace('-', "_")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasm_artifact_uses_crate_name() {
        let path = wasm_artifact_path(Path::new("/ws"), "kipu-bank-stylus");
        assert_eq!(
            path,
            PathBuf::from("/ws/target/wasm32-unknown-unknown/release/kipu_bank_stylus.wasm")
        );
    }

    #[test]
    fn workspace_is_parent_of_scripts() {
        let workspace = workspace_path().unwrap();
        assert!(workspace.join("scripts").join("Cargo.toml").exists());
        assert!(workspace.join("contracts").join("Cargo.toml").exists());
    }
}
