//! End-to-end extraction and aggregation over a raw file payload.

use dsa_lib::figma::FileResponse;
use dsa_lib::{
    aggregate, AnalysisSession, DocumentResolver, FontSize, FrameExtractor, LoadedDocument,
};
use serde_json::json;

fn hmi_file() -> FileResponse {
    serde_json::from_value(json!({
        "name": "HMI Screens",
        "lastModified": "2026-08-01T10:00:00Z",
        "document": {
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": [{
                "id": "0:1",
                "name": "Page 1",
                "type": "CANVAS",
                "children": [
                    {
                        "id": "1:1",
                        "name": "Home",
                        "type": "FRAME",
                        "absoluteBoundingBox": {"x": 0.0, "y": 0.0, "width": 800.0, "height": 480.0},
                        "children": [
                            {
                                "id": "1:2",
                                "name": "Title",
                                "type": "TEXT",
                                "characters": "Hello",
                                "absoluteBoundingBox": {"x": 10.0, "y": 10.0, "width": 200.0, "height": 32.0},
                                "style": {"fontFamily": "Inter", "fontWeight": 700.0, "fontSize": 24.0}
                            },
                            {
                                "id": "1:3",
                                "name": "Background",
                                "type": "RECTANGLE",
                                "absoluteBoundingBox": {"x": 0.0, "y": 0.0, "width": 800.0, "height": 480.0},
                                "fills": [{"type": "SOLID", "color": {"r": 0.2, "g": 0.4, "b": 0.6, "a": 1.0}}]
                            },
                            {
                                "id": "1:4",
                                "name": "StatusBadge",
                                "type": "INSTANCE",
                                "componentId": "c:badge",
                                "absoluteBoundingBox": {"x": 20.0, "y": 60.0, "width": 80.0, "height": 24.0}
                            },
                            {
                                "id": "1:5",
                                "name": "Close",
                                "type": "INSTANCE",
                                "componentId": "c:close",
                                "absoluteBoundingBox": {"x": 760.0, "y": 10.0, "width": 24.0, "height": 24.0}
                            }
                        ]
                    },
                    {
                        "id": "2:1",
                        "name": "Settings",
                        "type": "FRAME",
                        "absoluteBoundingBox": {"x": 900.0, "y": 0.0, "width": 800.0, "height": 480.0},
                        "children": [
                            {
                                "id": "2:2",
                                "name": "StatusBadge",
                                "type": "INSTANCE",
                                "componentId": "c:badge",
                                "absoluteBoundingBox": {"x": 920.0, "y": 20.0, "width": 80.0, "height": 24.0}
                            },
                            {
                                "id": "2:3",
                                "name": "Body",
                                "type": "TEXT",
                                "characters": "Settings",
                                "absoluteBoundingBox": {"x": 920.0, "y": 60.0, "width": 200.0, "height": 20.0},
                                "style": {"fontFamily": "Inter", "fontSize": 14.0},
                                "styles": {"text": "s:body"}
                            },
                            {
                                "id": "2:4",
                                "name": "Accent",
                                "type": "RECTANGLE",
                                "absoluteBoundingBox": {"x": 920.0, "y": 100.0, "width": 40.0, "height": 40.0},
                                "fills": [{"type": "SOLID", "opacity": 0.5, "color": {"r": 0.2, "g": 0.4, "b": 0.6, "a": 1.0}}],
                                "styles": {"fill": "s:primary"}
                            }
                        ]
                    }
                ]
            }]
        },
        "components": {
            "c:badge": {"key": "", "name": "StatusBadge"},
            "c:close": {"key": "closekey", "name": "Close", "componentSetId": "set:icon"}
        },
        "componentSets": {
            "set:icon": {"key": "setkey", "name": "Icon/Close"}
        },
        "styles": {
            "s:primary": {"key": "k1", "name": "Primary Color", "styleType": "FILL"},
            "s:body": {"key": "k2", "name": "Body", "styleType": "TEXT"}
        }
    }))
    .expect("fixture parses")
}

#[test]
fn analyzes_home_frame_end_to_end() {
    let document = LoadedDocument::from_file_response(&hmi_file());
    let resolver = DocumentResolver::new(&document.index);

    let frames = document.select_frames(&["1:1".to_string()]).unwrap();
    let record = FrameExtractor::new(&resolver).extract(frames[0]);

    assert_eq!(record.frame_info.name, "Home");
    assert_eq!(record.frame_info.element_count, 5);

    assert_eq!(record.fonts.len(), 1);
    assert_eq!(record.fonts[0].font_family, "Inter");
    assert_eq!(record.fonts[0].font_style, "Bold");
    assert_eq!(record.fonts[0].font_size, FontSize::Px(24.0));
    assert!(record.fonts[0].style_name.is_none());

    assert_eq!(record.colors.len(), 1);
    assert_eq!(record.colors[0].hex, "#336699");
    assert!((record.colors[0].opacity - 1.0).abs() < f32::EPSILON);

    assert_eq!(record.components.len(), 1);
    assert_eq!(record.components[0].master_name, "StatusBadge");
    assert_eq!(record.components[0].instance_count, 1);
    assert!(!record.components[0].is_variant);

    assert_eq!(record.icons.len(), 1);
    assert_eq!(record.icons[0].master_name, "Icon/Close");
    assert_eq!(record.icons[0].variant_name.as_deref(), Some("Close"));
    assert!(record.icons[0].is_variant);
    assert_eq!(record.icons[0].instance_count, 1);
    assert_eq!(record.icons[0].variant_key, "closekey");
}

#[test]
fn settings_frame_resolves_styles_and_opacity() {
    let document = LoadedDocument::from_file_response(&hmi_file());
    let resolver = DocumentResolver::new(&document.index);

    let frames = document.select_frames(&["2:1".to_string()]).unwrap();
    let record = FrameExtractor::new(&resolver).extract(frames[0]);

    assert_eq!(record.fonts.len(), 1);
    assert_eq!(record.fonts[0].style_name.as_deref(), Some("Body"));
    assert_eq!(record.text_styles.len(), 1);
    assert_eq!(record.text_styles[0].style_name, "Body");

    assert_eq!(record.colors.len(), 1);
    assert_eq!(record.colors[0].color_key, "#336699@50%");
    assert_eq!(record.colors[0].style_name.as_deref(), Some("Primary Color"));
    assert!(record.color_style_names.contains("Primary Color"));
}

#[test]
fn aggregation_key_set_is_order_invariant() {
    let document = LoadedDocument::from_file_response(&hmi_file());
    let resolver = DocumentResolver::new(&document.index);

    let home = FrameExtractor::new(&resolver)
        .extract(document.select_frames(&["1:1".to_string()]).unwrap()[0]);
    let settings = FrameExtractor::new(&resolver)
        .extract(document.select_frames(&["2:1".to_string()]).unwrap()[0]);

    let forward = aggregate(&[home.clone(), settings.clone()]);
    let backward = aggregate(&[settings, home]);

    let keys = |summary: &dsa_lib::SummaryRecord| {
        let mut keys: Vec<String> = summary
            .components
            .iter()
            .chain(summary.icons.iter())
            .map(|c| c.summary_key())
            .collect();
        keys.sort();
        keys
    };

    assert_eq!(keys(&forward), keys(&backward));
    assert_eq!(forward.frame_count, 2);
    // StatusBadge appears in both frames but is listed once, with the
    // first record's count rather than a sum
    assert_eq!(
        forward
            .components
            .iter()
            .filter(|c| c.master_name == "StatusBadge")
            .count(),
        1
    );
    assert_eq!(forward.components[0].instance_count, 1);
}

#[test]
fn session_summarizes_both_frames() {
    let document = LoadedDocument::from_file_response(&hmi_file());
    let resolver = DocumentResolver::new(&document.index);
    let mut session = AnalysisSession::new();

    for frame in document.select_frames(&[]).unwrap() {
        session.store(FrameExtractor::new(&resolver).extract(frame));
    }

    let summary = session.summarize();
    assert_eq!(summary.frame_count, 2);
    // two hexes at summary level: #336699 appears at two opacities but
    // dedups on hex alone
    assert_eq!(summary.colors.len(), 1);
    assert_eq!(summary.colors[0].hex, "#336699");
    assert_eq!(summary.fonts.len(), 2);
    assert_eq!(summary.icons.len(), 1);
    assert_eq!(summary.components.len(), 1);
}
