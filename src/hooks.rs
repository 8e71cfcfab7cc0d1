//! Notification presets for Stop hooks.
//!
//! Each platform gets three ready-made shell commands a user can attach as
//! a Stop hook without writing one by hand. The hook entries themselves
//! live in the code settings schema; this module only supplies commands.

/// One ready-made notification command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookPreset {
    pub name: &'static str,
    pub command: &'static str,
}

const WINDOWS_PRESETS: [HookPreset; 3] = [
    HookPreset {
        name: "beep",
        command: r#"powershell -NoProfile -ExecutionPolicy Bypass -Command "[console]::beep(1000,500)""#,
    },
    HookPreset {
        name: "toast",
        command: r#"powershell -NoProfile -ExecutionPolicy Bypass -Command "Add-Type -AssemblyName System.Windows.Forms; [System.Windows.Forms.MessageBox]::Show('Claude Code task completed!', 'Notification')""#,
    },
    HookPreset {
        name: "sound",
        command: r#"powershell -NoProfile -ExecutionPolicy Bypass -Command "(New-Object Media.SoundPlayer 'C:\Windows\Media\notify.wav').PlaySync()""#,
    },
];

const MACOS_PRESETS: [HookPreset; 3] = [
    HookPreset {
        name: "beep",
        command: "afplay /System/Library/Sounds/Glass.aiff",
    },
    HookPreset {
        name: "toast",
        command: r#"osascript -e 'display notification "Claude Code task completed!" with title "Notification"'"#,
    },
    HookPreset {
        name: "sound",
        command: "afplay /System/Library/Sounds/Ping.aiff",
    },
];

const LINUX_PRESETS: [HookPreset; 3] = [
    HookPreset {
        name: "beep",
        command: r#"paplay /usr/share/sounds/freedesktop/stereo/complete.oga 2>/dev/null || echo -e '\a'"#,
    },
    HookPreset {
        name: "toast",
        command: r#"notify-send "Claude Code" "Task completed!""#,
    },
    HookPreset {
        name: "sound",
        command: r#"paplay /usr/share/sounds/freedesktop/stereo/message.oga 2>/dev/null || echo -e '\a'"#,
    },
];

/// Presets for the platform this binary runs on.
pub fn presets() -> &'static [HookPreset] {
    presets_for(std::env::consts::OS)
}

/// Presets for a named platform. Unknown platforms get the Linux table.
pub fn presets_for(os: &str) -> &'static [HookPreset] {
    match os {
        "windows" => &WINDOWS_PRESETS,
        "macos" => &MACOS_PRESETS,
        _ => &LINUX_PRESETS,
    }
}

/// The command behind a preset name on the current platform.
pub fn preset_command(name: &str) -> Option<&'static str> {
    presets().iter().find(|p| p.name == name).map(|p| p.command)
}
