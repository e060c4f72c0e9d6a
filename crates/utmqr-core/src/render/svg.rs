//! SVG serialization of a module matrix.

use std::fmt::Write;

use super::QrMatrix;

/// Renders `matrix` as standalone SVG markup with `size`×`size` logical dimensions.
///
/// The viewBox is one unit per module; dark modules are merged into
/// horizontal runs so the path stays compact.
pub fn to_svg(matrix: &QrMatrix, size: u32) -> String {
    let n = matrix.width();
    let mut dark_path = String::new();
    for (y, row) in matrix.rows().enumerate() {
        let mut x = 0;
        while x < n {
            if !row[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < n && row[x] {
                x += 1;
            }
            let _ = write!(dark_path, "M{start} {y}h{}v1H{start}z", x - start);
        }
    }

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {n} {n}" shape-rendering="crispEdges">"#,
            r##"<path fill="#FFFFFF" d="M0,0 h{n}v{n}H0z"/>"##,
            r##"<path fill="#000000" d="{path}"/>"##,
            "</svg>"
        ),
        size = size,
        n = n,
        path = dark_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorCorrection;

    #[test]
    fn declares_logical_size_and_viewbox() {
        let m = QrMatrix::encode("https://example.com/", ErrorCorrection::High, true).unwrap();
        let svg = to_svg(&m, 256);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains(r#"width="256" height="256""#));
        assert!(svg.contains(&format!(r#"viewBox="0 0 {0} {0}""#, m.width())));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn runs_cover_every_dark_module() {
        let m = QrMatrix::encode("abc", ErrorCorrection::Low, true).unwrap();
        let svg = to_svg(&m, 256);
        let dark_modules: usize = m.rows().map(|r| r.iter().filter(|d| **d).count()).sum();
        let run_total: usize = svg
            .split('M')
            .skip(2)
            .filter_map(|seg| seg.split_once('h'))
            .filter_map(|(_, rest)| rest.split('v').next()?.parse::<usize>().ok())
            .sum();
        assert_eq!(run_total, dark_modules);
    }
}
