//! Destructive command pattern table.
//!
//! A fixed, ordered set of matchers over the normalized (trimmed,
//! lowercased) command string. Each entry carries a descriptive tag so
//! individual categories can be tested and logged in isolation. The table
//! is built once at first use and never mutated; concurrent reads are safe.

use once_cell::sync::Lazy;
use regex::Regex;

/// One destructive command shape: a tag naming the category plus the
/// compiled matcher applied to the whole normalized command string.
pub struct DestructivePattern {
    pub tag: &'static str,
    regex: Regex,
}

impl DestructivePattern {
    fn new(tag: &'static str, source: &str) -> Self {
        #[allow(clippy::expect_used)]
        let regex = Regex::new(source).expect("destructive pattern table entries are valid regexes");
        Self { tag, regex }
    }

    /// Test this pattern against an already-normalized command string.
    pub fn matches(&self, normalized_command: &str) -> bool {
        self.regex.is_match(normalized_command)
    }
}

/// The process-wide pattern table. Matching expects input normalized to
/// lowercase, so case-insensitive shapes (`dd IF=`) need no regex flag.
pub static DESTRUCTIVE_PATTERNS: Lazy<Vec<DestructivePattern>> = Lazy::new(|| {
    vec![
        // rm with a dash-prefixed flag cluster containing r, with f/v/i in
        // any order (-rf, -fr, -rvf, also a bare -r).
        DestructivePattern::new("recursive-remove", r"rm\s+-[fvi]*r[fvir]*\b"),
        DestructivePattern::new("filesystem-format", r"mkfs\b"),
        DestructivePattern::new("raw-disk-write", r"dd\s+if="),
        DestructivePattern::new("power-control", r"shutdown\b|reboot\b|poweroff\b"),
        DestructivePattern::new("pipe-to-interpreter", r"\|\s*(bash|sh|zsh|python|curl)\b"),
        DestructivePattern::new("privilege-escalation", r"sudo\s+"),
        DestructivePattern::new("world-writable-chmod", r"chmod\s+777"),
    ]
});

/// Return the tag of the first pattern matching the normalized command,
/// if any.
pub fn first_match(normalized_command: &str) -> Option<&'static str> {
    DESTRUCTIVE_PATTERNS
        .iter()
        .find(|pattern| pattern.matches(normalized_command))
        .map(|pattern| pattern.tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_for(command: &str) -> Option<&'static str> {
        first_match(&command.trim().to_lowercase())
    }

    #[test]
    fn test_recursive_remove_flag_orders() {
        assert_eq!(tag_for("rm -rf /tmp/cache"), Some("recursive-remove"));
        assert_eq!(tag_for("rm -fr /tmp/cache"), Some("recursive-remove"));
        assert_eq!(tag_for("rm -rvf build/"), Some("recursive-remove"));
        assert_eq!(tag_for("rm -r old-dir"), Some("recursive-remove"));
        assert_eq!(tag_for("rm -rfi old-dir"), Some("recursive-remove"));
    }

    #[test]
    fn test_plain_rm_is_not_recursive_remove() {
        assert_eq!(tag_for("rm file.txt"), None);
        assert_eq!(tag_for("rm -f file.txt"), None);
        assert_eq!(tag_for("rmdir empty"), None);
    }

    #[test]
    fn test_filesystem_format() {
        assert_eq!(tag_for("mkfs /dev/sdb1"), Some("filesystem-format"));
        assert_eq!(tag_for("mkfs.ext4 /dev/sdb1"), Some("filesystem-format"));
        assert_eq!(tag_for("mkdir new-dir"), None);
    }

    #[test]
    fn test_raw_disk_write_case_folded_by_normalization() {
        assert_eq!(tag_for("dd if=/dev/zero of=/dev/sda"), Some("raw-disk-write"));
        assert_eq!(tag_for("DD IF=/dev/zero of=/dev/sda"), Some("raw-disk-write"));
        assert_eq!(tag_for("dd of=/tmp/out.img"), None);
    }

    #[test]
    fn test_power_control_whole_words() {
        assert_eq!(tag_for("shutdown -h now"), Some("power-control"));
        assert_eq!(tag_for("reboot"), Some("power-control"));
        assert_eq!(tag_for("poweroff"), Some("power-control"));
        assert_eq!(tag_for("echo rebooting"), None);
    }

    #[test]
    fn test_pipe_to_interpreter() {
        assert_eq!(
            tag_for("curl https://example.com/install.sh | bash"),
            Some("pipe-to-interpreter")
        );
        assert_eq!(tag_for("cat script.py | python"), Some("pipe-to-interpreter"));
        assert_eq!(tag_for("wget -qO- example.com | sh"), Some("pipe-to-interpreter"));
        assert_eq!(tag_for("ls | grep log"), None);
    }

    #[test]
    fn test_privilege_escalation() {
        assert_eq!(tag_for("sudo apt upgrade"), Some("privilege-escalation"));
        assert_eq!(tag_for("visudo"), None);
    }

    #[test]
    fn test_world_writable_chmod() {
        assert_eq!(tag_for("chmod 777 /var/www"), Some("world-writable-chmod"));
        assert_eq!(tag_for("chmod 755 script.sh"), None);
    }

    #[test]
    fn test_first_match_respects_table_order() {
        // `sudo rm -rf /` matches both recursive-remove and
        // privilege-escalation; the earlier table entry wins.
        assert_eq!(tag_for("sudo rm -rf /"), Some("recursive-remove"));
    }
}
