//! Formats sampled tiles as Unreal `EdGraphNode_Comment` clipboard text.

use crate::sample::TileColor;

/// Comment node edge length in Unreal canvas units (not pixels).
pub const NODE_SIZE: u32 = 48;

/// Minimum average opacity for a tile to be emitted at all.
pub const ALPHA_TOLERANCE: f32 = 0.1;

/// How color channels are rendered as `[0, 1]` decimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPrecision {
    /// At most 3 decimal places (5 characters total). Every byte saved
    /// matters when the paste buffer holds thousands of nodes.
    #[default]
    Compact,
    /// Full float display precision.
    Full,
}

#[derive(Debug, Clone, Copy)]
pub struct EmitOptions {
    /// Average alpha, filter transparent tiles, and use the alpha-aware
    /// comment schema. Off reproduces the opaque legacy schema.
    pub track_alpha: bool,
    pub precision: ColorPrecision,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            track_alpha: true,
            precision: ColorPrecision::Compact,
        }
    }
}

/// Renders a color byte as `[0, 1]` decimal text with a dot separator,
/// regardless of locale.
fn channel_text(byte: u8, precision: ColorPrecision) -> String {
    let text = (byte as f32 / 255.0).to_string();
    match precision {
        ColorPrecision::Full => text,
        // "0.xyz" is 5 characters; "0" and "1" pass through untouched.
        ColorPrecision::Compact if text.len() > 5 => text[..5].to_string(),
        ColorPrecision::Compact => text,
    }
}

/// Formats cell `(grid_x, grid_y)` as a comment-node text block, or `None`
/// when the tile is too transparent to keep.
///
/// Blocks are newline-prefixed so plain concatenation yields a valid paste
/// buffer.
pub fn emit_node(
    color: TileColor,
    grid_x: u32,
    grid_y: u32,
    opts: &EmitOptions,
) -> Option<String> {
    if opts.track_alpha && color.opacity() < ALPHA_TOLERANCE {
        return None;
    }

    let r = channel_text(color.r, opts.precision);
    let g = channel_text(color.g, opts.precision);
    let b = channel_text(color.b, opts.precision);

    let mut node = String::new();
    node.push_str("\nBegin Object Class=/Script/UnrealEd.EdGraphNode_Comment");
    if opts.track_alpha {
        let a = channel_text(color.a, opts.precision);
        node.push_str(&format!("\nCommentColor=(R={r},G={g},B={b},A={a})"));
        node.push_str("\nbCommentBubbleVisible_InDetailsPanel=False");
    } else {
        node.push_str(&format!("\nCommentColor=(R={r},G={g},B={b})"));
    }
    node.push_str(&format!("\nNodePosX={}", grid_x * NODE_SIZE));
    node.push_str(&format!("\nNodePosY={}", grid_y * NODE_SIZE));
    node.push_str(&format!("\nNodeWidth={NODE_SIZE}"));
    node.push_str(&format!("\nNodeHeight={NODE_SIZE}"));
    if opts.track_alpha {
        node.push_str("\nbCommentBubblePinned=False");
    }
    node.push_str("\nbCommentBubbleVisible=False");
    node.push_str("\nEnd Object");

    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(r: u8, g: u8, b: u8, a: u8) -> TileColor {
        TileColor { r, g, b, a }
    }

    #[test]
    fn compact_channels_are_truncated_to_five_chars() {
        assert_eq!(channel_text(0, ColorPrecision::Compact), "0");
        assert_eq!(channel_text(255, ColorPrecision::Compact), "1");
        assert_eq!(channel_text(128, ColorPrecision::Compact), "0.501");
        for byte in 0..=255u8 {
            assert!(channel_text(byte, ColorPrecision::Compact).len() <= 5);
        }
    }

    #[test]
    fn full_precision_keeps_the_whole_float() {
        let text = channel_text(128, ColorPrecision::Full);
        assert!(text.len() > 5);
        assert!(text.starts_with("0.50196"));
    }

    #[test]
    fn transparent_tile_is_filtered() {
        let opts = EmitOptions::default();
        // 25/255 is just under the 10% tolerance, 26/255 just over.
        assert!(emit_node(rgba(255, 0, 0, 25), 0, 0, &opts).is_none());
        assert!(emit_node(rgba(255, 0, 0, 26), 0, 0, &opts).is_some());
    }

    #[test]
    fn opaque_variant_never_filters() {
        let opts = EmitOptions {
            track_alpha: false,
            ..EmitOptions::default()
        };
        assert!(emit_node(rgba(255, 0, 0, 0), 0, 0, &opts).is_some());
    }

    #[test]
    fn alpha_schema_block() {
        let node = emit_node(rgba(255, 0, 0, 255), 2, 3, &EmitOptions::default())
            .expect("opaque tile");
        assert_eq!(
            node,
            "\nBegin Object Class=/Script/UnrealEd.EdGraphNode_Comment\
             \nCommentColor=(R=1,G=0,B=0,A=1)\
             \nbCommentBubbleVisible_InDetailsPanel=False\
             \nNodePosX=96\
             \nNodePosY=144\
             \nNodeWidth=48\
             \nNodeHeight=48\
             \nbCommentBubblePinned=False\
             \nbCommentBubbleVisible=False\
             \nEnd Object"
        );
    }

    #[test]
    fn legacy_schema_block() {
        let opts = EmitOptions {
            track_alpha: false,
            ..EmitOptions::default()
        };
        let node = emit_node(rgba(0, 255, 0, 255), 0, 1, &opts).expect("always emits");
        assert_eq!(
            node,
            "\nBegin Object Class=/Script/UnrealEd.EdGraphNode_Comment\
             \nCommentColor=(R=0,G=1,B=0)\
             \nNodePosX=0\
             \nNodePosY=48\
             \nNodeWidth=48\
             \nNodeHeight=48\
             \nbCommentBubbleVisible=False\
             \nEnd Object"
        );
    }
}
