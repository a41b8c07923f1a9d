//! Shared fixtures for integration tests: scripted fake engine binaries and
//! canned machine-readable report streams.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// A machine-readable stream the way the real engine emits it: log lines
/// mixed with the report XML, a `validationReport` carrying two rule
/// summaries, and a trailing `summary` element.
pub fn mrr_stream(profile_name: &str) -> String {
    format!(
        r#"INFO  [main] processor started
<?xml version="1.0" encoding="UTF-8"?>
<report>
  <buildInformation>fake engine 1.0</buildInformation>
  <jobs>
    <job>
      <validationReport profileName="{profile_name}" statement="PDF file is not compliant with Validation Profile requirements." isCompliant="false">
        <details passedRules="98" failedRules="2" passedChecks="512" failedChecks="3">
          <rule specification="ISO 19005" clause="6.1.7" testNumber="1" status="failed" failedChecks="2">
            <description>The file trailer dictionary shall contain the ID keyword.</description>
            <object>CosTrailer</object>
          </rule>
          <rule specification="ISO 19005" clause="6.2.3" testNumber="2" status="failed" failedChecks="1">
            <description>DeviceRGB may be used only with a matching output intent.</description>
            <object>PDDeviceRGB</object>
          </rule>
        </details>
      </validationReport>
    </job>
  </jobs>
  <summary jobs="1" valid="0" inValid="1" failedJobs="0"></summary>
</report>
INFO  [main] processor finished
"#
    )
}

/// Write an executable shell script into `dir` and return its path.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Fake engine that prints a full mrr stream for the given profile.
pub fn reporting_engine(dir: &Path, profile_name: &str) -> PathBuf {
    let stream = mrr_stream(profile_name);
    write_script(dir, "engine.sh", &format!("cat <<'MRR_EOF'\n{stream}\nMRR_EOF"))
}

/// Fake engine that picks the profile from its input file name: targets
/// containing `part2` report against a part-2 profile, everything else
/// against part 1. Arguments arrive as `--format mrr <input>`.
pub fn profile_switching_engine(dir: &Path) -> PathBuf {
    let part_one = mrr_stream("PDF/A-1B validation profile");
    let part_two = mrr_stream("PDF/A-2B validation profile");
    write_script(
        dir,
        "engine.sh",
        &format!(
            r#"case "$3" in
  *part2*) cat <<'MRR_EOF'
{part_two}
MRR_EOF
  ;;
  *) cat <<'MRR_EOF'
{part_one}
MRR_EOF
  ;;
esac"#
        ),
    )
}

/// Fake engine that outruns any short timeout.
pub fn sleeping_engine(dir: &Path, sleep_secs: u32) -> PathBuf {
    write_script(dir, "engine.sh", &format!("sleep {sleep_secs}\necho too-late"))
}

/// Fake engine that dies with diagnostics instead of a report.
pub fn crashing_engine(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "engine.sh",
        "echo 'Exception in thread \"main\": java.io.IOException: corrupt xref table'\nexit 1",
    )
}

/// Fake engine that produces no output at all.
pub fn silent_engine(dir: &Path) -> PathBuf {
    write_script(dir, "engine.sh", "exit 0")
}

/// Create a placeholder PDF target file.
pub fn pdf_target(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "%PDF-1.4\n%%EOF\n").unwrap();
    path
}
