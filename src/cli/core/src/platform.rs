/* src/cli/core/src/platform.rs */

// Platform tokens: `web`, `windows`, `macos`, `linux`, `ios`, `android`,
// or a Steam-branded desktop build written `steam:<windows|macos|linux>`.

use std::fmt;

/// Desktop operating systems handled by the Electron packager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesktopOs {
  Windows,
  Macos,
  Linux,
}

impl DesktopOs {
  pub const ALL: [Self; 3] = [Self::Windows, Self::Macos, Self::Linux];

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "windows" => Some(Self::Windows),
      "macos" => Some(Self::Macos),
      "linux" => Some(Self::Linux),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::Macos => "macos",
      Self::Linux => "linux",
    }
  }

  /// Key of the OS section in the packager config.
  pub fn section(self) -> &'static str {
    match self {
      Self::Windows => "win",
      Self::Macos => "mac",
      Self::Linux => "linux",
    }
  }

  /// Installer target used when the config has no section for this OS.
  pub fn default_target(self) -> &'static str {
    match self {
      Self::Windows => "portable",
      Self::Macos => "dmg",
      Self::Linux => "deb",
    }
  }

  /// Packager CLI switch selecting this OS.
  pub fn packager_flag(self) -> &'static str {
    match self {
      Self::Windows => "--win",
      Self::Macos => "--mac",
      Self::Linux => "--linux",
    }
  }
}

/// Mobile platforms handled by the native bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobileOs {
  Ios,
  Android,
}

impl MobileOs {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Ios => "ios",
      Self::Android => "android",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
  Web,
  Desktop { os: DesktopOs, steam: bool },
  Mobile(MobileOs),
}

/// A platform token resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSpec {
  token: String,
  platform: Platform,
  dir: String,
}

impl PlatformSpec {
  /// Resolve a raw `--platform` value (case-insensitive). `None` for unknown tokens.
  pub fn resolve(raw: &str) -> Option<Self> {
    let token = raw.trim().to_lowercase();
    let platform = match token.split_once(':') {
      None => match token.as_str() {
        "web" => Platform::Web,
        "ios" => Platform::Mobile(MobileOs::Ios),
        "android" => Platform::Mobile(MobileOs::Android),
        other => Platform::Desktop { os: DesktopOs::parse(other)?, steam: false },
      },
      Some(("steam", variant)) => Platform::Desktop { os: DesktopOs::parse(variant)?, steam: true },
      Some(_) => return None,
    };
    let dir = platform_dir(&token);
    Some(Self { token, platform, dir })
  }

  /// Normalized token, as exported to child processes.
  pub fn token(&self) -> &str {
    &self.token
  }

  pub fn platform(&self) -> Platform {
    self.platform
  }

  /// Output subdirectory: `steam:macos` -> `steam/macos`, `web` -> `web`.
  pub fn dir(&self) -> &str {
    &self.dir
  }
}

impl fmt::Display for PlatformSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.token)
  }
}

/// Replace the first `:` with a path separator; tokens without one are used as-is.
pub fn platform_dir(token: &str) -> String {
  match token.split_once(':') {
    Some((family, variant)) => format!("{family}/{variant}"),
    None => token.to_string(),
  }
}
