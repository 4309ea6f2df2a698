//! The exported stylesheet is consumed by firmware tooling; its field
//! names and key derivation are contractual.

use dsa_lib::figma::FileResponse;
use dsa_lib::{AnalysisSession, DocumentResolver, DsaError, FrameExtractor, LoadedDocument};
use serde_json::json;

fn styled_file() -> FileResponse {
    serde_json::from_value(json!({
        "name": "Styles",
        "document": {
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": [{
                "id": "0:1",
                "name": "Page 1",
                "type": "CANVAS",
                "children": [{
                    "id": "1:1",
                    "name": "Palette",
                    "type": "FRAME",
                    "absoluteBoundingBox": {"x": 0.0, "y": 0.0, "width": 400.0, "height": 300.0},
                    "children": [
                        {
                            "id": "1:2",
                            "name": "swatch-a",
                            "type": "RECTANGLE",
                            "absoluteBoundingBox": {"x": 0.0, "y": 0.0, "width": 40.0, "height": 40.0},
                            "fills": [{"type": "SOLID", "color": {"r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0}}],
                            "styles": {"fill": "s:a"}
                        },
                        {
                            "id": "1:3",
                            "name": "swatch-b",
                            "type": "RECTANGLE",
                            "absoluteBoundingBox": {"x": 50.0, "y": 0.0, "width": 40.0, "height": 40.0},
                            "fills": [{"type": "SOLID", "color": {"r": 0.0, "g": 0.0, "b": 1.0, "a": 1.0}}],
                            "styles": {"fill": "s:b"}
                        },
                        {
                            "id": "1:4",
                            "name": "plain",
                            "type": "RECTANGLE",
                            "absoluteBoundingBox": {"x": 100.0, "y": 0.0, "width": 40.0, "height": 40.0},
                            "fills": [{"type": "SOLID", "color": {"r": 0.2, "g": 0.4, "b": 0.6, "a": 1.0}}]
                        },
                        {
                            "id": "1:5",
                            "name": "Heading",
                            "type": "TEXT",
                            "characters": "Palette",
                            "absoluteBoundingBox": {"x": 0.0, "y": 60.0, "width": 200.0, "height": 30.0},
                            "style": {"fontFamily": "Noto Sans", "fontWeight": 500.0, "fontSize": 16.0}
                        }
                    ]
                }]
            }]
        },
        "components": {},
        "componentSets": {},
        "styles": {
            "s:a": {"key": "ka", "name": "Primary Color", "styleType": "FILL"},
            "s:b": {"key": "kb", "name": "primary-color", "styleType": "FILL"}
        }
    }))
    .expect("fixture parses")
}

fn export_session() -> AnalysisSession {
    let document = LoadedDocument::from_file_response(&styled_file());
    let resolver = DocumentResolver::new(&document.index);
    let mut session = AnalysisSession::new();
    for frame in document.select_frames(&[]).unwrap() {
        session.store(FrameExtractor::new(&resolver).extract(frame));
    }
    session
}

#[test]
fn stylesheet_keys_collide_first_write_wins() {
    let session = export_session();
    let stylesheet = session.export().unwrap();

    // "Primary Color" and "primary-color" sanitize to the same key;
    // the first iterated color keeps it and the other is dropped.
    // Record colors iterate in hex order, so #0000FF arrives first.
    assert_eq!(stylesheet.colors.len(), 2);
    let primary = stylesheet.colors.get("primary_color").unwrap();
    assert_eq!(primary.figma_style_name.as_deref(), Some("primary-color"));
    assert_eq!(primary.hex, "#0000FF");

    let synthesized = stylesheet.colors.get("color_336699").unwrap();
    assert!(synthesized.figma_style_name.is_none());
}

#[test]
fn serialized_document_carries_contract_field_names() {
    let session = export_session();
    let stylesheet = session.export().unwrap();
    let json = serde_json::to_value(&stylesheet).unwrap();

    let color = &json["colors"]["primary_color"];
    for field in ["figma_style_name", "hex", "rgb565", "lvgl_color", "lvgl_macro"] {
        assert!(
            color.get(field).is_some(),
            "color entry missing contract field {field}"
        );
    }
    assert_eq!(color["rgb565"], "0x001F");
    assert_eq!(color["lvgl_color"], "lv_color_hex(0x0000FF)");
    assert_eq!(color["lvgl_macro"], "#define COLOR_PRIMARY_COLOR 0x001F");

    let font = &json["typography"]["noto_sans_medium_16"];
    for field in [
        "figma_style_name",
        "font_family",
        "font_size",
        "font_weight",
        "lvgl_font",
        "lvgl_declaration",
    ] {
        assert!(
            font.get(field).is_some(),
            "font entry missing contract field {field}"
        );
    }
    assert_eq!(font["font_family"], "Noto Sans");
    assert_eq!(font["font_size"], 16.0);
    assert_eq!(font["font_weight"], "Medium");
    assert_eq!(font["lvgl_font"], "&lv_font_noto_sans_16");
    assert_eq!(font["lvgl_declaration"], "LV_FONT_DECLARE(lv_font_noto_sans_16);");
}

#[test]
fn export_without_data_is_signaled_not_written() {
    let session = AnalysisSession::new();
    assert!(matches!(session.export(), Err(DsaError::EmptyExport)));
}
