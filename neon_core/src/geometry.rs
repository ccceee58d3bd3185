//! Small closure-based helpers: distances and colour widths.

/// Theme palette.
pub const NEON_COLORS: [&str; 5] = ["#00ffff", "#ff00ff", "#ffff00", "#8a2be2", "#00ffaa"];

/// Euclidean distance between two points of equal dimension.
///
/// Extra coordinates in the longer slice are ignored.
pub fn calculate_distance(p1: &[f64], p2: &[f64]) -> f64 {
    p1.iter()
        .zip(p2)
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Number of hex digits in each colour (every `#` stripped).
pub fn color_brightness(colors: &[&str]) -> Vec<usize> {
    colors
        .iter()
        .map(|c| c.chars().filter(|&ch| ch != '#').count())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NeuralNode;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_distance_3_4_5() {
        assert_relative_eq!(calculate_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
    }

    #[test]
    fn test_distance_matches_nalgebra() {
        let a = NeuralNode::new("a", Vector3::new(1.0, 2.0, 3.0));
        let b = NeuralNode::new("b", Vector3::new(-2.0, 6.0, 3.0));
        let via_slices = calculate_distance(a.position.as_slice(), b.position.as_slice());
        assert_relative_eq!((a.position - b.position).norm(), via_slices);
        assert_relative_eq!(via_slices, 5.0);
    }

    #[test]
    fn test_color_brightness() {
        assert_eq!(color_brightness(&NEON_COLORS), vec![6; 5]);
        assert_eq!(color_brightness(&["#abc", "##ff"]), vec![3, 2]);
    }
}
