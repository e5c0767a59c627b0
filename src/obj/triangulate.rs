//! Ear-clipping triangulation of planar polygons.

use tracing::debug;

use crate::Index;

type Point = (f32, f32);

// Sweeps over the polygon before giving up on the rest of it.
const MAX_ROUNDS: usize = 10;
const EPSILON: f32 = 1e-4;

/// Splits `polygon` into triangles and passes each of them to `emit`.
///
/// `vertices` is the flat position array of the document. Concave polygons
/// are handled; if no ear can be found after a bounded number of sweeps, the
/// vertices that are left are dropped.
///
/// Returns the offending zero-based position index if any corner refers past
/// the end of `vertices`.
pub(super) fn triangulate(
    polygon: &[Index],
    vertices: &[f32],
    mut emit: impl FnMut([Index; 3]),
) -> Result<(), u32> {
    let num_vertices = vertices.len() / 3;
    if let Some(i) = polygon.iter().find(|i| i.vertex as usize >= num_vertices) {
        return Err(i.vertex);
    }
    let position = |i: Index| {
        let i = i.vertex as usize * 3;
        [vertices[i], vertices[i + 1], vertices[i + 2]]
    };

    if polygon.len() < 3 {
        return Ok(());
    }
    if polygon.len() == 3 {
        emit([polygon[0], polygon[1], polygon[2]]);
        return Ok(());
    }

    let (a0, a1) = projection_axes(polygon, position);
    let point = |i: Index| {
        let p = position(i);
        (p[a0], p[a1])
    };

    // Its sign tells the winding of the whole polygon.
    let n = polygon.len();
    let area: f32 = (0..n)
        .map(|k| {
            let (x0, y0) = point(polygon[k]);
            let (x1, y1) = point(polygon[(k + 1) % n]);
            (x0 * y1 - y0 * x1) * 0.5
        })
        .sum();

    let mut remaining = polygon.to_vec();
    let mut guess = 0;
    let mut rounds = MAX_ROUNDS;
    while remaining.len() > 3 && rounds > 0 {
        let n = remaining.len();
        if guess >= n {
            rounds -= 1;
            guess -= n;
        }
        let ear = [
            remaining[guess % n],
            remaining[(guess + 1) % n],
            remaining[(guess + 2) % n],
        ];
        let triangle = ear.map(point);
        let [(x0, y0), (x1, y1), (x2, y2)] = triangle;
        let cross = (x1 - x0) * (y2 - y1) - (y1 - y0) * (x2 - x1);
        // reflex corner
        if cross * area < 0. {
            guess += 1;
            continue;
        }
        let overlap =
            (3..n).any(|k| in_triangle(&triangle, point(remaining[(guess + k) % n])));
        if overlap {
            guess += 1;
            continue;
        }

        emit(ear);
        remaining.remove((guess + 1) % n);
    }

    if let [i0, i1, i2] = remaining[..] {
        emit([i0, i1, i2]);
    } else {
        debug!(
            dropped = remaining.len(),
            polygon = polygon.len(),
            "gave up triangulating polygon"
        );
    }
    Ok(())
}

/// Picks the two coordinate axes to project the polygon onto, from the
/// normal of its first non-degenerate corner.
fn projection_axes(polygon: &[Index], position: impl Fn(Index) -> [f32; 3]) -> (usize, usize) {
    let n = polygon.len();
    for k in 0..n {
        let v0 = position(polygon[k]);
        let v1 = position(polygon[(k + 1) % n]);
        let v2 = position(polygon[(k + 2) % n]);
        let e0 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let e1 = [v2[0] - v1[0], v2[1] - v1[1], v2[2] - v1[2]];
        let cx = (e0[1] * e1[2] - e0[2] * e1[1]).abs();
        let cy = (e0[2] * e1[0] - e0[0] * e1[2]).abs();
        let cz = (e0[0] * e1[1] - e0[1] * e1[0]).abs();
        if cx > EPSILON || cy > EPSILON || cz > EPSILON {
            return if cx > cy && cx > cz {
                (1, 2)
            } else if cz > cx && cz > cy {
                (0, 1)
            } else {
                (0, 2)
            };
        }
    }
    (1, 2)
}

/// Even-odd crossing test.
fn in_triangle(triangle: &[Point; 3], (tx, ty): Point) -> bool {
    let mut inside = false;
    let mut j = 2;
    for (i, &(xi, yi)) in triangle.iter().enumerate() {
        let (xj, yj) = triangle[j];
        if (yi > ty) != (yj > ty) && tx < (xj - xi) * (ty - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn indices(n: usize) -> Vec<Index> {
        (0..n as u32).map(|i| Index::new(i, None, None)).collect()
    }

    fn run(polygon: &[Index], vertices: &[f32]) -> Vec<[Index; 3]> {
        let mut triangles = vec![];
        triangulate(polygon, vertices, |t| triangles.push(t)).unwrap();
        triangles
    }

    // Signed area of a triangle in the plane spanned by `axes`.
    fn signed_area(t: [Index; 3], vertices: &[f32], (a0, a1): (usize, usize)) -> f32 {
        let p = |i: Index| {
            let i = i.vertex as usize * 3;
            (vertices[i + a0], vertices[i + a1])
        };
        let [(x0, y0), (x1, y1), (x2, y2)] = t.map(p);
        ((x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0)) * 0.5
    }

    #[test]
    fn convex() {
        for _ in 0..50 {
            let n = fastrand::usize(3..=32);
            let clockwise = fastrand::bool();
            let plane = fastrand::usize(0..3);
            let c = fastrand::f32() * 10. - 5.;
            let mut vertices = vec![];
            for k in 0..n {
                let mut theta = 2. * PI * k as f32 / n as f32;
                if clockwise {
                    theta = -theta;
                }
                let (x, y) = (theta.cos(), theta.sin());
                vertices.extend_from_slice(&match plane {
                    0 => [x, y, c],
                    1 => [x, c, y],
                    _ => [c, x, y],
                });
            }
            let axes = match plane {
                0 => (0, 1),
                1 => (0, 2),
                _ => (1, 2),
            };
            let polygon = indices(n);
            assert_eq!(projection_axes(&polygon, |i| {
                let i = i.vertex as usize * 3;
                [vertices[i], vertices[i + 1], vertices[i + 2]]
            }), axes);

            let triangles = run(&polygon, &vertices);
            assert_eq!(triangles.len(), n - 2, "n={n}");
            let expected = 0.5 * n as f32 * (2. * PI / n as f32).sin();
            let total: f32 = triangles
                .iter()
                .map(|&t| signed_area(t, &vertices, axes).abs())
                .sum();
            assert!((total - expected).abs() < 1e-3, "n={n}: {total} != {expected}");
        }
    }

    #[test]
    fn concave() {
        // A square with a notch cut into its top edge; the notch vertex lies
        // inside the first candidate ear.
        #[rustfmt::skip]
        let vertices = [
            0., 0., 0.,
            2., 0., 0.,
            2., 2., 0.,
            1., 0.8, 0.,
            0., 2., 0.,
        ];
        let triangles = run(&indices(5), &vertices);
        assert_eq!(triangles.len(), 3);
        let mut total = 0.;
        for &t in &triangles {
            let area = signed_area(t, &vertices, (0, 1));
            assert!(area > 0., "{t:?}");
            total += area;
        }
        assert!((total - 2.8).abs() < 1e-5, "{total}");
        assert_eq!(triangles[0].map(|i| i.vertex), [1, 2, 3]);
    }

    #[test]
    fn triangle() {
        let polygon = [
            Index::new(2, Some(0), None),
            Index::new(0, Some(1), Some(4)),
            Index::new(1, None, Some(2)),
        ];
        let vertices = [0.; 9];
        assert_eq!(run(&polygon, &vertices), [polygon]);
    }

    #[test]
    fn degenerate() {
        // collinear
        let vertices: Vec<f32> = (0..6).flat_map(|i| [i as f32, 0., 0.]).collect();
        let triangles = run(&indices(6), &vertices);
        assert!(triangles.len() <= 4);
        // coincident
        let vertices = [1.; 15];
        let triangles = run(&indices(5), &vertices);
        assert!(triangles.len() <= 3);
    }

    #[test]
    fn out_of_bounds() {
        let vertices = [0.; 9];
        let mut polygon = indices(3);
        polygon.push(Index::new(7, None, None));
        let mut called = false;
        assert_eq!(triangulate(&polygon, &vertices, |_| called = true), Err(7));
        assert!(!called);
    }

    #[test]
    fn point_in_triangle() {
        let t = [(0., 0.), (2., 0.), (2., 2.)];
        assert!(in_triangle(&t, (1.5, 0.5)));
        assert!(!in_triangle(&t, (0.5, 1.5)));
        assert!(!in_triangle(&t, (3., 1.)));
    }
}
