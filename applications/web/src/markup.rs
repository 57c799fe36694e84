//! HTML fragments for the widget

use tunebox_playback::{Theme, Track, VolumeIcon};

pub const PLAY_ICON: &str = r#"<i class="fas fa-play"></i>"#;
pub const PAUSE_ICON: &str = r#"<i class="fas fa-pause"></i>"#;

/// Escape text for interpolation into element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Markup for one playlist row
///
/// `data-index` is read back by the delegated click handler.
pub fn playlist_item(index: usize, track: &Track, active: bool) -> String {
    let class = if active {
        "playlist-item active"
    } else {
        "playlist-item"
    };

    format!(
        r#"<div class="{class}" data-index="{index}">
    <div class="playlist-item-info">
        <div class="playlist-item-title">{title}</div>
        <div class="playlist-item-artist">{artist}</div>
    </div>
    <div class="playlist-item-actions">
        <button class="delete-btn" title="Delete Song">
            <i class="fas fa-trash"></i>
        </button>
    </div>
</div>"#,
        class = class,
        index = index,
        title = escape_html(&track.title),
        artist = escape_html(&track.artist),
    )
}

/// Markup for the whole playlist
pub fn playlist(tracks: &[Track], active: Option<usize>) -> String {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| playlist_item(i, track, active == Some(i)))
        .collect()
}

/// Class list for the `.volume-icon` element
pub fn volume_icon_class(icon: VolumeIcon) -> &'static str {
    match icon {
        VolumeIcon::Muted => "fas fa-volume-mute volume-icon",
        VolumeIcon::Low => "fas fa-volume-down volume-icon",
        VolumeIcon::Full => "fas fa-volume-up volume-icon",
    }
}

/// Contents of the theme toggle button
pub fn theme_toggle(theme: Theme) -> String {
    let icon = if theme.is_dark() { "fa-moon" } else { "fa-sun" };
    format!(
        r#"<i class="fas {}"></i><span>{}</span>"#,
        icon,
        theme.label()
    )
}
