//! The sidecar store: durable per-asset adjustment documents.
//!
//! One XML file per asset, path derived by suffix substitution
//! (`IMG_0001.jpg` → `IMG_0001.jpg.iadj.xml`). The document has a
//! versioned root element:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <iPhotoAdjustments version="1.0">
//!   <Light>
//!     <Light_Master>0.30</Light_Master>
//!     <Light_Enabled>true</Light_Enabled>
//!     <Exposure>0.10</Exposure>
//!     <!-- remaining light/color/monochrome keys -->
//!   </Light>
//!   <crop>
//!     <x>0.050000</x><y>0.000000</y><w>0.900000</w><h>1.000000</h>
//!     <straighten>0.000000</straighten><rotate90>0.000000</rotate90>
//!     <vertical>0.000000</vertical><horizontal>0.000000</horizontal>
//!     <flipHorizontal>false</flipHorizontal>
//!   </crop>
//!   <Curves>
//!     <Curve channel="rgb"><Point x="0.000000" y="0.050000"/></Curve>
//!   </Curves>
//! </iPhotoAdjustments>
//! ```
//!
//! # Load contract
//!
//! [`load`] never fails: a missing, unreadable, or malformed document
//! yields the default set, and a single malformed child falls back to
//! its field default without disturbing siblings. Two legacy shapes
//! are normalized at load time: an attribute-based `<Crop cx= cy= w=
//! h=/>` element, and monochrome deltas stored in [-1, 1] (detected
//! by sign, remapped to [0, 1]).
//!
//! # Save contract
//!
//! [`save`] writes the full document to a temporary file in the
//! destination directory and atomically renames it over the sidecar
//! path. A failed save removes the temporary file and leaves any
//! existing document byte-for-byte intact.

use crate::adjust::AdjustmentSet;
use crate::error::{StoreError, StoreResult};
use darkroom_core::{CurveChannel, CurvePoint};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Root element of a sidecar document.
const ROOT_TAG: &str = "iPhotoAdjustments";
/// Document version written by this implementation.
const DOC_VERSION: &str = "1.0";
/// Suffix appended to the asset file name.
const SIDECAR_SUFFIX: &str = ".iadj.xml";

/// Derives the sidecar path for an asset: the asset path with
/// `.iadj.xml` appended.
pub fn sidecar_path_for(asset: &Path) -> PathBuf {
    let mut name = asset.as_os_str().to_os_string();
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// Loads the adjustment set for an asset.
///
/// Never fails; see the module docs for the tolerance rules.
pub fn load(asset: &Path) -> AdjustmentSet {
    let path = sidecar_path_for(asset);
    match fs::read(&path) {
        Ok(bytes) => parse_document(&bytes),
        Err(err) => {
            debug!("no sidecar at {}: {err}", path.display());
            AdjustmentSet::default()
        }
    }
}

/// Saves the adjustment set for an asset, returning the sidecar path.
pub fn save(asset: &Path, set: &AdjustmentSet) -> StoreResult<PathBuf> {
    let dest = sidecar_path_for(asset);
    let mut document = Vec::new();
    serialize(&mut document, set)?;

    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&document)?;
    tmp.flush()?;
    tmp.persist(&dest).map_err(|e| StoreError::Persist {
        path: dest.clone(),
        source: e.error,
    })?;
    Ok(dest)
}

/// Which container element the parser is currently inside.
#[derive(PartialEq)]
enum Section {
    None,
    Settings,
    Crop,
    Curves,
}

/// Parses sidecar bytes into an [`AdjustmentSet`].
///
/// Exposed for tests and for collaborators that keep documents
/// somewhere other than the filesystem.
pub fn parse_document(bytes: &[u8]) -> AdjustmentSet {
    let mut xml = Reader::from_reader(bytes);
    xml.config_mut().trim_text(true);

    let mut set = AdjustmentSet::default();
    let mut buf = Vec::new();
    let mut section = Section::None;
    let mut root_seen = false;
    let mut current_text = String::new();
    let mut current_curve: Option<CurveChannel> = None;
    let mut current_points: Vec<CurvePoint> = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if !root_seen {
                    if name != ROOT_TAG {
                        debug!("unexpected sidecar root element <{name}>");
                        return AdjustmentSet::default();
                    }
                    root_seen = true;
                }
                match name.as_str() {
                    "Light" => section = Section::Settings,
                    "crop" => section = Section::Crop,
                    "Curves" => section = Section::Curves,
                    "Curve" => {
                        current_curve = curve_channel_attr(e);
                        current_points.clear();
                    }
                    "Point" => read_point(e, &mut current_points),
                    "Crop" => read_legacy_crop(e, &mut set),
                    _ => {}
                }
                current_text.clear();
            }
            Ok(Event::Empty(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "Point" => read_point(e, &mut current_points),
                    "Crop" => read_legacy_crop(e, &mut set),
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                current_text = e.xml_content().unwrap_or_default().into();
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "Light" | "crop" | "Curves" => section = Section::None,
                    "Curve" => {
                        if let Some(channel) = current_curve.take() {
                            set.set_curve(channel, std::mem::take(&mut current_points));
                        }
                    }
                    _ => match section {
                        Section::Settings => apply_setting(&mut set, &name, &current_text),
                        Section::Crop => apply_crop_field(&mut set, &name, &current_text),
                        _ => {}
                    },
                }
                current_text.clear();
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                debug!("sidecar parse error, falling back to defaults: {err}");
                return AdjustmentSet::default();
            }
            _ => {}
        }
        buf.clear();
    }

    if !root_seen {
        return AdjustmentSet::default();
    }
    set
}

/// Parses an f32 child, logging and skipping malformed text.
fn parse_f32(name: &str, text: &str) -> Option<f32> {
    match text.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!("skipping malformed sidecar field <{name}>: {text:?}");
            None
        }
    }
}

/// Parses a boolean child (`true`/`false`, `1`/`0`).
fn parse_bool(name: &str, text: &str) -> Option<bool> {
    match text.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        other => {
            warn!("skipping malformed sidecar field <{name}>: {other:?}");
            None
        }
    }
}

/// Legacy monochrome values were stored in [-1, 1]; the canonical era
/// is [0, 1], so a negative value is the legacy discriminator.
fn remap_legacy_mono(v: f32) -> f32 {
    if v < 0.0 { (v + 1.0) / 2.0 } else { v }
}

fn apply_setting(set: &mut AdjustmentSet, name: &str, text: &str) {
    macro_rules! f32_field {
        ($slot:expr) => {
            if let Some(v) = parse_f32(name, text) {
                $slot = v;
            }
        };
        ($slot:expr, $map:expr) => {
            if let Some(v) = parse_f32(name, text) {
                $slot = $map(v);
            }
        };
    }
    match name {
        "Light_Master" => f32_field!(set.light.master),
        "Light_Enabled" => {
            if let Some(v) = parse_bool(name, text) {
                set.light.enabled = v;
            }
        }
        "Exposure" => f32_field!(set.light.exposure),
        "Brightness" => f32_field!(set.light.brightness),
        "Brilliance" => f32_field!(set.light.brilliance),
        "Highlights" => f32_field!(set.light.highlights),
        "Shadows" => f32_field!(set.light.shadows),
        "Contrast" => f32_field!(set.light.contrast),
        "BlackPoint" => f32_field!(set.light.black_point),
        "Color_Master" => f32_field!(set.color.master),
        "Color_Enabled" => {
            if let Some(v) = parse_bool(name, text) {
                set.color.enabled = v;
            }
        }
        "Saturation" => f32_field!(set.color.saturation),
        "Vibrance" => f32_field!(set.color.vibrance),
        "Cast" => f32_field!(set.color.cast),
        "WhiteBalanceR" => f32_field!(set.color.wb_gain_r),
        "WhiteBalanceG" => f32_field!(set.color.wb_gain_g),
        "WhiteBalanceB" => f32_field!(set.color.wb_gain_b),
        "Mono_Master" => f32_field!(set.mono.master),
        "Mono_Enabled" => {
            if let Some(v) = parse_bool(name, text) {
                set.mono.enabled = v;
            }
        }
        "Mono_Intensity" => f32_field!(set.mono.intensity, remap_legacy_mono),
        "Mono_Neutrals" => f32_field!(set.mono.neutrals, remap_legacy_mono),
        "Mono_Tone" => f32_field!(set.mono.tone, remap_legacy_mono),
        "Mono_Grain" => {
            f32_field!(set.mono.grain, |v: f32| remap_legacy_mono(v).clamp(0.0, 1.0))
        }
        _ => {}
    }
}

fn apply_crop_field(set: &mut AdjustmentSet, name: &str, text: &str) {
    let Some(v) = parse_f32_or_bool(set, name, text) else {
        return;
    };
    match name {
        "x" => set.geometry.crop_cx = v,
        "y" => set.geometry.crop_cy = v,
        "w" => set.geometry.crop_w = v,
        "h" => set.geometry.crop_h = v,
        "straighten" => set.geometry.straighten = v,
        "rotate90" => set.geometry.rotate90 = v,
        "vertical" => set.geometry.skew_v = v,
        "horizontal" => set.geometry.skew_h = v,
        _ => {}
    }
}

/// Crop fields are numeric except `flipHorizontal`, handled inline.
fn parse_f32_or_bool(set: &mut AdjustmentSet, name: &str, text: &str) -> Option<f32> {
    if name == "flipHorizontal" {
        if let Some(v) = parse_bool(name, text) {
            set.geometry.flip_horizontal = v;
        }
        return None;
    }
    parse_f32(name, text)
}

/// Legacy shape: `<Crop cx=".." cy=".." w=".." h=".."/>` with the crop
/// expressed as element attributes. Normalized straight into the
/// canonical geometry group.
fn read_legacy_crop(e: &BytesStart<'_>, set: &mut AdjustmentSet) {
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match key.as_str() {
            "cx" => {
                if let Some(v) = parse_f32(&key, &value) {
                    set.geometry.crop_cx = v;
                }
            }
            "cy" => {
                if let Some(v) = parse_f32(&key, &value) {
                    set.geometry.crop_cy = v;
                }
            }
            "w" => {
                if let Some(v) = parse_f32(&key, &value) {
                    set.geometry.crop_w = v;
                }
            }
            "h" => {
                if let Some(v) = parse_f32(&key, &value) {
                    set.geometry.crop_h = v;
                }
            }
            "rotate90" => {
                if let Some(v) = parse_f32(&key, &value) {
                    set.geometry.rotate90 = v;
                }
            }
            "flip" => {
                if let Some(v) = parse_bool(&key, &value) {
                    set.geometry.flip_horizontal = v;
                }
            }
            _ => {}
        }
    }
}

fn curve_channel_attr(e: &BytesStart<'_>) -> Option<CurveChannel> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"channel" {
            let name = String::from_utf8_lossy(&attr.value).to_string();
            let channel = CurveChannel::from_name(&name);
            if channel.is_none() {
                warn!("skipping curve with unknown channel {name:?}");
            }
            return channel;
        }
    }
    warn!("skipping curve without channel attribute");
    None
}

fn read_point(e: &BytesStart<'_>, points: &mut Vec<CurvePoint>) {
    let mut x = None;
    let mut y = None;
    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"x" => x = parse_f32("x", &value),
            b"y" => y = parse_f32("y", &value),
            _ => {}
        }
    }
    if let (Some(x), Some(y)) = (x, y) {
        points.push(CurvePoint::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)));
    }
}

/// Maps a writer-side error into [`StoreError::Serialize`].
fn ser<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Serialize(e.to_string())
}

/// Serializes a set into sidecar XML.
pub fn serialize<W: Write>(writer: W, set: &AdjustmentSet) -> StoreResult<()> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(ser)?;

    let mut root = BytesStart::new(ROOT_TAG);
    root.push_attribute(("version", DOC_VERSION));
    xml.write_event(Event::Start(root)).map_err(ser)?;

    // Settings container: light, color, and monochrome keys together.
    xml.write_event(Event::Start(BytesStart::new("Light")))
        .map_err(ser)?;
    write_slider(&mut xml, "Light_Master", set.light.master)?;
    write_bool(&mut xml, "Light_Enabled", set.light.enabled)?;
    write_slider(&mut xml, "Exposure", set.light.exposure)?;
    write_slider(&mut xml, "Brightness", set.light.brightness)?;
    write_slider(&mut xml, "Brilliance", set.light.brilliance)?;
    write_slider(&mut xml, "Highlights", set.light.highlights)?;
    write_slider(&mut xml, "Shadows", set.light.shadows)?;
    write_slider(&mut xml, "Contrast", set.light.contrast)?;
    write_slider(&mut xml, "BlackPoint", set.light.black_point)?;
    write_slider(&mut xml, "Color_Master", set.color.master)?;
    write_bool(&mut xml, "Color_Enabled", set.color.enabled)?;
    write_slider(&mut xml, "Saturation", set.color.saturation)?;
    write_slider(&mut xml, "Vibrance", set.color.vibrance)?;
    write_slider(&mut xml, "Cast", set.color.cast)?;
    write_slider(&mut xml, "WhiteBalanceR", set.color.wb_gain_r)?;
    write_slider(&mut xml, "WhiteBalanceG", set.color.wb_gain_g)?;
    write_slider(&mut xml, "WhiteBalanceB", set.color.wb_gain_b)?;
    write_slider(&mut xml, "Mono_Master", set.mono.master)?;
    write_bool(&mut xml, "Mono_Enabled", set.mono.enabled)?;
    write_slider(&mut xml, "Mono_Intensity", set.mono.intensity)?;
    write_slider(&mut xml, "Mono_Neutrals", set.mono.neutrals)?;
    write_slider(&mut xml, "Mono_Tone", set.mono.tone)?;
    write_slider(&mut xml, "Mono_Grain", set.mono.grain)?;
    xml.write_event(Event::End(BytesEnd::new("Light")))
        .map_err(ser)?;

    xml.write_event(Event::Start(BytesStart::new("crop")))
        .map_err(ser)?;
    write_geo(&mut xml, "x", set.geometry.crop_cx)?;
    write_geo(&mut xml, "y", set.geometry.crop_cy)?;
    write_geo(&mut xml, "w", set.geometry.crop_w)?;
    write_geo(&mut xml, "h", set.geometry.crop_h)?;
    write_geo(&mut xml, "straighten", set.geometry.straighten)?;
    write_geo(&mut xml, "rotate90", set.geometry.rotate90)?;
    write_geo(&mut xml, "vertical", set.geometry.skew_v)?;
    write_geo(&mut xml, "horizontal", set.geometry.skew_h)?;
    write_bool(&mut xml, "flipHorizontal", set.geometry.flip_horizontal)?;
    xml.write_event(Event::End(BytesEnd::new("crop")))
        .map_err(ser)?;

    if !set.curves_are_identity() {
        xml.write_event(Event::Start(BytesStart::new("Curves")))
            .map_err(ser)?;
        for channel in CurveChannel::ALL {
            let points = set.curve(channel);
            if points.is_empty() {
                continue;
            }
            let mut curve = BytesStart::new("Curve");
            curve.push_attribute(("channel", channel.name()));
            xml.write_event(Event::Start(curve)).map_err(ser)?;
            for p in points {
                let mut point = BytesStart::new("Point");
                point.push_attribute(("x", format!("{:.6}", p.x).as_str()));
                point.push_attribute(("y", format!("{:.6}", p.y).as_str()));
                xml.write_event(Event::Empty(point)).map_err(ser)?;
            }
            xml.write_event(Event::End(BytesEnd::new("Curve")))
                .map_err(ser)?;
        }
        xml.write_event(Event::End(BytesEnd::new("Curves")))
            .map_err(ser)?;
    }

    xml.write_event(Event::End(BytesEnd::new(ROOT_TAG)))
        .map_err(ser)?;
    Ok(())
}

/// Writes a slider value at the stored `%.2f` precision.
fn write_slider<W: Write>(xml: &mut Writer<W>, name: &str, value: f32) -> StoreResult<()> {
    write_text_element(xml, name, &format!("{value:.2}"))
}

/// Writes a geometry value at `%.6f` precision.
fn write_geo<W: Write>(xml: &mut Writer<W>, name: &str, value: f32) -> StoreResult<()> {
    write_text_element(xml, name, &format!("{value:.6}"))
}

fn write_bool<W: Write>(xml: &mut Writer<W>, name: &str, value: bool) -> StoreResult<()> {
    write_text_element(xml, name, if value { "true" } else { "false" })
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> StoreResult<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))
        .map_err(ser)?;
    xml.write_event(Event::Text(BytesText::new(text)))
        .map_err(ser)?;
    xml.write_event(Event::End(BytesEnd::new(name)))
        .map_err(ser)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_set() -> AdjustmentSet {
        let mut set = AdjustmentSet::default();
        set.light.master = 0.3;
        set.light.exposure = 0.1;
        set.light.contrast = -0.25;
        set.color.saturation = 0.45;
        set.color.wb_gain_r = 1.12;
        set.mono.enabled = true;
        set.mono.intensity = 0.75;
        set.mono.grain = 0.2;
        set.geometry.crop_cx = 0.5;
        set.geometry.crop_w = 0.9;
        set.geometry.flip_horizontal = true;
        set.set_curve(
            CurveChannel::Rgb,
            vec![CurvePoint::new(0.0, 0.05), CurvePoint::new(1.0, 1.0)],
        );
        set
    }

    #[test]
    fn test_sidecar_path_suffix() {
        let p = sidecar_path_for(Path::new("/photos/IMG_0001.jpg"));
        assert_eq!(p, PathBuf::from("/photos/IMG_0001.jpg.iadj.xml"));
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let set = sample_set();
        let mut bytes = Vec::new();
        serialize(&mut bytes, &set).unwrap();
        let loaded = parse_document(&bytes);

        // Sliders are stored at %.2f: tolerance is the precision.
        assert_relative_eq!(loaded.light.master, 0.3, epsilon = 0.01);
        assert_relative_eq!(loaded.light.exposure, 0.1, epsilon = 0.01);
        assert_relative_eq!(loaded.light.contrast, -0.25, epsilon = 0.01);
        assert_relative_eq!(loaded.color.saturation, 0.45, epsilon = 0.01);
        assert_relative_eq!(loaded.color.wb_gain_r, 1.12, epsilon = 0.01);
        assert!(loaded.mono.enabled);
        assert_relative_eq!(loaded.mono.intensity, 0.75, epsilon = 0.01);
        assert_relative_eq!(loaded.geometry.crop_w, 0.9, epsilon = 1e-5);
        assert!(loaded.geometry.flip_horizontal);
        let curve = loaded.curve(CurveChannel::Rgb);
        assert_eq!(curve.len(), 2);
        assert_relative_eq!(curve[0].y, 0.05, epsilon = 1e-5);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let set = load(&dir.path().join("nowhere.jpg"));
        assert_eq!(set, AdjustmentSet::default());
    }

    #[test]
    fn test_save_then_load_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let asset = dir.path().join("shot.jpg");
        let set = sample_set();
        let sidecar = save(&asset, &set).unwrap();
        assert!(sidecar.ends_with("shot.jpg.iadj.xml"));
        let loaded = load(&asset);
        assert_relative_eq!(loaded.light.master, 0.3, epsilon = 0.01);
        assert!(loaded.mono.enabled);
    }

    #[test]
    fn test_wrong_root_yields_default() {
        let set = parse_document(b"<SomethingElse version=\"1.0\"/>");
        assert_eq!(set, AdjustmentSet::default());
    }

    #[test]
    fn test_garbage_bytes_yield_default() {
        let set = parse_document(b"not xml at all <<<");
        assert_eq!(set, AdjustmentSet::default());
    }

    #[test]
    fn test_malformed_field_skipped_siblings_kept() {
        let doc = format!(
            "<{ROOT_TAG} version=\"1.0\"><Light>\
             <Exposure>banana</Exposure>\
             <Brightness>0.20</Brightness>\
             </Light></{ROOT_TAG}>"
        );
        let set = parse_document(doc.as_bytes());
        assert_eq!(set.light.exposure, 0.0);
        assert_relative_eq!(set.light.brightness, 0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_escaped_text_is_resolved() {
        // Character references in field text must resolve before the
        // numeric parse sees them.
        let doc = format!(
            "<{ROOT_TAG} version=\"1.0\"><Light>\
             <Exposure>&#48;.25</Exposure>\
             </Light></{ROOT_TAG}>"
        );
        let set = parse_document(doc.as_bytes());
        assert_relative_eq!(set.light.exposure, 0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_unknown_children_ignored() {
        let doc = format!(
            "<{ROOT_TAG} version=\"1.0\"><Light>\
             <FutureControl>3.5</FutureControl>\
             <Exposure>0.10</Exposure>\
             </Light></{ROOT_TAG}>"
        );
        let set = parse_document(doc.as_bytes());
        assert_relative_eq!(set.light.exposure, 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_legacy_crop_attributes() {
        let doc = format!(
            "<{ROOT_TAG} version=\"0.9\">\
             <Crop cx=\"0.4\" cy=\"0.6\" w=\"0.5\" h=\"0.5\" flip=\"true\"/>\
             </{ROOT_TAG}>"
        );
        let set = parse_document(doc.as_bytes());
        assert_relative_eq!(set.geometry.crop_cx, 0.4, epsilon = 1e-5);
        assert_relative_eq!(set.geometry.crop_cy, 0.6, epsilon = 1e-5);
        assert_relative_eq!(set.geometry.crop_w, 0.5, epsilon = 1e-5);
        assert!(set.geometry.flip_horizontal);
    }

    #[test]
    fn test_legacy_mono_range_remapped() {
        let doc = format!(
            "<{ROOT_TAG} version=\"0.9\"><Light>\
             <Mono_Enabled>true</Mono_Enabled>\
             <Mono_Intensity>-0.50</Mono_Intensity>\
             <Mono_Tone>0.80</Mono_Tone>\
             <Mono_Grain>-0.50</Mono_Grain>\
             </Light></{ROOT_TAG}>"
        );
        let set = parse_document(doc.as_bytes());
        // -0.5 in legacy [-1, 1] is 0.25 in canonical [0, 1].
        assert_relative_eq!(set.mono.intensity, 0.25, epsilon = 1e-5);
        assert_relative_eq!(set.mono.grain, 0.25, epsilon = 1e-5);
        // Positive values pass through either way.
        assert_relative_eq!(set.mono.tone, 0.8, epsilon = 1e-5);
    }

    #[test]
    fn test_save_is_atomic_over_existing() {
        let dir = tempfile::tempdir().unwrap();
        let asset = dir.path().join("keep.jpg");
        save(&asset, &sample_set()).unwrap();

        let mut second = AdjustmentSet::default();
        second.light.exposure = -0.8;
        save(&asset, &second).unwrap();

        let loaded = load(&asset);
        assert_relative_eq!(loaded.light.exposure, -0.8, epsilon = 0.01);
        // Exactly one sidecar file, no stray temporaries.
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_identity_curves_not_written() {
        let mut bytes = Vec::new();
        serialize(&mut bytes, &AdjustmentSet::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("<Curves>"));
        assert!(text.contains("version=\"1.0\""));
    }
}
