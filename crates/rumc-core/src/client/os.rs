//! Operating-system qualifiers derived from a lowercased user-agent.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileOs {
    Android,
    IpadOs,
    Ios,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopOs {
    Windows,
    Mac,
    Linux,
    ChromeOs,
}

// Checked in order; "ipad" user-agents also say "like mac os".
const MOBILE_OS_RULES: &[(&str, MobileOs)] = &[
    ("android", MobileOs::Android),
    ("ipad", MobileOs::IpadOs),
    ("like mac os", MobileOs::Ios),
];

const DESKTOP_OS_RULES: &[(&str, DesktopOs)] = &[
    ("windows", DesktopOs::Windows),
    ("mac os", DesktopOs::Mac),
    ("linux", DesktopOs::Linux),
    ("x11; cros", DesktopOs::ChromeOs),
];

pub fn mobile_os(lc_user_agent: &str) -> Option<MobileOs> {
    MOBILE_OS_RULES
        .iter()
        .find(|(needle, _)| lc_user_agent.contains(needle))
        .map(|&(_, os)| os)
}

pub fn desktop_os(lc_user_agent: &str) -> Option<DesktopOs> {
    DESKTOP_OS_RULES
        .iter()
        .find(|(needle, _)| lc_user_agent.contains(needle))
        .map(|&(_, os)| os)
}

impl fmt::Display for MobileOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MobileOs::Android => "android",
            MobileOs::IpadOs => "ipados",
            MobileOs::Ios => "ios",
        })
    }
}

impl fmt::Display for DesktopOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DesktopOs::Windows => "windows",
            DesktopOs::Mac => "mac",
            DesktopOs::Linux => "linux",
            DesktopOs::ChromeOs => "chromeos",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_precedence() {
        assert_eq!(mobile_os("linux; android 10; mobile"), Some(MobileOs::Android));
        assert_eq!(
            mobile_os("(ipad; cpu os 16_0 like mac os x) mobile/15e148"),
            Some(MobileOs::IpadOs)
        );
        assert_eq!(
            mobile_os("(iphone; cpu iphone os 17_0 like mac os x) mobile/15e148"),
            Some(MobileOs::Ios)
        );
        assert_eq!(mobile_os("opera/9.80 (j2me/midp; opera mini/9.80)"), None);
    }

    #[test]
    fn desktop_precedence() {
        assert_eq!(desktop_os("(windows nt 10.0; win64; x64)"), Some(DesktopOs::Windows));
        assert_eq!(desktop_os("(macintosh; intel mac os x 10_15_7)"), Some(DesktopOs::Mac));
        assert_eq!(desktop_os("(x11; linux x86_64)"), Some(DesktopOs::Linux));
        assert_eq!(desktop_os("(x11; cros x86_64 14541.0.0)"), Some(DesktopOs::ChromeOs));
        assert_eq!(desktop_os("lynx/2.8.9rel.1"), None);
    }
}
