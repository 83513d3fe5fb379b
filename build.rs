use std::process::Command;
use vergen::EmitBuilder;

fn main() {
    // Git metadata is optional so the crate still builds from a source tarball.
    let in_git_repo = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    let result = if in_git_repo {
        EmitBuilder::builder()
            .build_timestamp()
            .git_sha(false)
            .emit()
    } else {
        EmitBuilder::builder().build_timestamp().emit()
    };

    result.expect("Unable to generate build metadata");
}
