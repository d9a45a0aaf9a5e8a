use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();

    // Dev builds carry the hash; a clean checkout sitting on the version tag is a release.
    let is_dirty = git(&["status", "--porcelain"])
        .map(|s| !s.is_empty())
        .unwrap_or(false);
    let version = env!("CARGO_PKG_VERSION");
    let tagged = git(&["tag", "--points-at", "HEAD"])
        .map(|s| s.lines().any(|t| t == format!("v{}", version) || t == version))
        .unwrap_or(false);

    println!("cargo:rustc-env=NOTAS_GIT_HASH={}", hash);
    println!("cargo:rustc-env=NOTAS_IS_RELEASE={}", tagged && !is_dirty);
}
