//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# prism configuration
# Only override what you want to change -- missing fields use defaults.

[paths]
# backups_dir = ""        # empty = ~/.local/share/prism/backups
# palettes_dir = ""       # empty = ~/.local/share/prism/palettes

[extractor]
# program = "magick"      # ImageMagick 7; use "convert" for ImageMagick 6
# colors = 16             # 8-256
# timeout_secs = 10       # 1-300

[backup]
# Files captured before every change, in addition to template targets.
# Paths outside your home directory must live under /etc and are restored with sudo.
# extra_files = ["/etc/sddm.conf.d/theme.conf"]

# Each template is rendered with the palette and replaces `target` atomically.
# Placeholder styles: "braced" uses {{NAME}}, "atat" uses @@NAME@@.
# Available names: PRIMARY, SECONDARY, ACCENT, BACKGROUND, TEXT, ERROR, SUCCESS,
# WARNING, BG_LIGHT, BG_DARK, CURSORLINE, BUTTON_BG, each also as NAME_HEX;
# PRIMARY, SECONDARY, ACCENT, BACKGROUND, TEXT and BG_LIGHT also as NAME_RGB
# ("r, g, b") and NAME_RGBA ("rgba(r,g,b,0xff)").

# [[templates]]
# name = "kitty"
# source = "~/.config/prism/templates/kitty.conf"
# target = "~/.config/kitty/colors.conf"
# style = "braced"

# [[templates]]
# name = "waybar"
# source = "~/.config/prism/templates/waybar.css"
# target = "~/.config/waybar/colors.css"
# style = "atat"

# Reload hooks run after rendering. Failures are logged, never fatal.

# [[reload]]
# name = "kitty"
# command = ["pkill", "-USR1", "kitty"]
# timeout_secs = 10

# [[reload]]
# name = "waybar"
# command = ["pkill", "-SIGUSR2", "waybar"]
"##
    .to_string()
}
