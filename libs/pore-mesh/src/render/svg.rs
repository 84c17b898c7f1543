//! # SVG Output
//!
//! Flat-shaded orthographic snapshots and section outlines as SVG documents.
//!
//! Snapshots use the painter's algorithm: back faces are culled and the
//! remaining triangles are drawn far to near.

use glam::DVec2;
use pore_batch::SnapshotOptions;

use super::camera::Camera;
use crate::mesh::Mesh;
use crate::section::CrossSection;

/// Fraction of the image kept free on each side.
const PADDING_FRACTION: f64 = 0.05;

/// Surface colour before shading (RGB).
const SURFACE_RGB: [f64; 3] = [150.0, 165.0, 185.0];

/// Ambient share of the surface colour.
const AMBIENT: f64 = 0.3;

/// Section outline colour.
const SECTION_STROKE: &str = "#1f3b57";

/// Maps a 2D content rectangle into the image, Y up.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    scale: f64,
    offset: DVec2,
    height: f64,
}

impl Viewport {
    fn fit(min: DVec2, max: DVec2, options: &SnapshotOptions) -> Self {
        let size = DVec2::new(f64::from(options.width), f64::from(options.height));
        let available = size * (1.0 - 2.0 * PADDING_FRACTION);
        let extent = (max - min).max(DVec2::splat(f64::EPSILON));
        let scale = (available.x / extent.x).min(available.y / extent.y);
        let content = extent * scale;
        let offset = (size - content) / 2.0 - min * scale;
        Self {
            scale,
            offset,
            height: size.y,
        }
    }

    fn to_pixel(self, p: DVec2) -> DVec2 {
        let q = p * self.scale + self.offset;
        DVec2::new(q.x, self.height - q.y)
    }
}

fn open_document(options: &SnapshotOptions) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <rect width="100%" height="100%" fill="{bg}"/>
"#,
        w = options.width,
        h = options.height,
        bg = escape_attribute(&options.background),
    )
}

/// Escapes text for use inside a double-quoted XML attribute.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Renders a mesh from `camera` into an SVG document.
pub fn render_mesh(mesh: &Mesh, camera: &Camera, options: &SnapshotOptions) -> String {
    let mut svg = open_document(options);

    if !mesh.is_empty() {
        let projected: Vec<DVec2> = mesh.vertices().iter().map(|v| camera.project(*v)).collect();
        let (min, max) = projected_bounds(mesh, camera);
        let viewport = Viewport::fit(min, max, options);

        let light = (camera.toward_eye * 0.8 + camera.up * 0.4 + camera.right * 0.2).normalize();

        let mut visible: Vec<(f64, usize)> = (0..mesh.triangle_count())
            .filter(|&i| mesh.face_normal(i).dot(camera.toward_eye) > 0.0)
            .map(|i| {
                let [a, b, c] = mesh.triangle_vertices(i);
                (camera.depth((a + b + c) / 3.0), i)
            })
            .collect();
        visible.sort_by(|a, b| a.0.total_cmp(&b.0));

        svg.push_str("  <g stroke-linejoin=\"round\">\n");
        for (_, i) in visible {
            let shade = AMBIENT + (1.0 - AMBIENT) * mesh.face_normal(i).dot(light).max(0.0);
            let [r, g, b] = SURFACE_RGB.map(|c| (c * shade).round() as u8);
            let tri = mesh.triangles()[i];
            let points = tri
                .map(|index| {
                    let p = viewport.to_pixel(projected[index as usize]);
                    format!("{:.2},{:.2}", p.x, p.y)
                })
                .join(" ");
            svg.push_str(&format!(
                "    <polygon points=\"{points}\" fill=\"rgb({r},{g},{b})\" stroke=\"rgb({r},{g},{b})\" stroke-width=\"0.5\"/>\n"
            ));
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

/// Renders a section's outline into an SVG document.
pub fn render_section(section: &CrossSection, options: &SnapshotOptions) -> String {
    let mut svg = open_document(options);

    if !section.is_empty() {
        let (min, max) = section.bounds();
        let viewport = Viewport::fit(min, max, options);

        let path = section
            .segments
            .iter()
            .map(|[a, b]| {
                let a = viewport.to_pixel(*a);
                let b = viewport.to_pixel(*b);
                format!("M{:.2} {:.2} L{:.2} {:.2}", a.x, a.y, b.x, b.y)
            })
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            "  <path d=\"{path}\" fill=\"none\" stroke=\"{SECTION_STROKE}\" stroke-width=\"2\" stroke-linecap=\"round\"/>\n"
        ));
    }

    svg.push_str(&format!(
        "  <text x=\"10\" y=\"20\" font-family=\"monospace\" font-size=\"14\" fill=\"#444\">{} @ {:.2}</text>\n",
        section.plane.label(),
        section.offset
    ));
    svg.push_str("</svg>\n");
    svg
}

/// Extent of a mesh projected by a camera, as (min, max).
pub fn projected_bounds(mesh: &Mesh, camera: &Camera) -> (DVec2, DVec2) {
    let mut points = mesh.vertices().iter().map(|v| camera.project(*v));
    let Some(first) = points.next() else {
        return (DVec2::ZERO, DVec2::ZERO);
    };
    points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;
    use pore_batch::{SectionPlane, StandardView};

    fn small_options() -> SnapshotOptions {
        SnapshotOptions::default().with_size(200, 100)
    }

    #[test]
    fn test_front_view_draws_only_front_faces() {
        let cube = create_cube(1.0).unwrap();
        let camera = Camera::for_view(StandardView::Front);
        let svg = render_mesh(&cube, &camera, &small_options());

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="200" height="100""#));
        assert_eq!(svg.matches("<polygon").count(), 2);
    }

    #[test]
    fn test_isometric_view_draws_three_faces() {
        let cube = create_cube(1.0).unwrap();
        let camera = Camera::for_view(StandardView::Isometric);
        let svg = render_mesh(&cube, &camera, &small_options());
        assert_eq!(svg.matches("<polygon").count(), 6);
    }

    #[test]
    fn test_empty_mesh_is_background_only() {
        let camera = Camera::for_view(StandardView::Top);
        let svg = render_mesh(&Mesh::new(), &camera, &small_options());
        assert!(svg.contains("#ffffff"));
        assert!(!svg.contains("<polygon"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_content_fits_inside_padding() {
        let cube = create_cube(10.0).unwrap();
        let camera = Camera::for_view(StandardView::Top);
        let options = small_options();
        let (min, max) = projected_bounds(&cube, &camera);
        let viewport = Viewport::fit(min, max, &options);

        for corner in [min, max] {
            let p = viewport.to_pixel(corner);
            assert!(p.x >= 0.0 && p.x <= 200.0);
            assert!(p.y >= 4.99 && p.y <= 95.01);
        }
    }

    #[test]
    fn test_background_is_escaped() {
        let options = small_options().with_background(r#"red" onload="alert(1)"#);
        let svg = render_mesh(&Mesh::new(), &Camera::for_view(StandardView::Top), &options);
        assert!(svg.contains(r#"fill="red&quot; onload=&quot;alert(1)""#));
        assert!(!svg.contains(r#"" onload=""#));
    }

    #[test]
    fn test_section_document() {
        let section = CrossSection {
            plane: SectionPlane::XZ,
            offset: 2.5,
            segments: vec![[DVec2::ZERO, DVec2::X], [DVec2::X, DVec2::ONE]],
        };
        let svg = render_section(&section, &small_options());
        assert_eq!(svg.matches('M').count(), 2);
        assert!(svg.contains("XZ @ 2.50"));
    }
}
