use std::{fmt, str::FromStr};

use crate::{
    Point, Rect,
    error::{Error, Result},
};

/// How the distance between two rectangles is measured.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceMethod {
    /// Euclidean distance between centers.
    #[default]
    Center,
    /// Minimum distance between any pair of corners.
    Corners,
    /// Minimum distance between any pair of edge midpoints.
    Edges,
}

impl DistanceMethod {
    /// Distance between two rectangles under this metric.
    pub fn distance(self, a: &Rect, b: &Rect) -> f64 {
        match self {
            Self::Center => a.center().distance(b.center()),
            Self::Corners => min_pairwise(&a.corners(), &b.corners()),
            Self::Edges => min_pairwise(&a.edges(), &b.edges()),
        }
    }

    /// Lowercase name, as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Corners => "corners",
            Self::Edges => "edges",
        }
    }
}

/// Smallest distance between a point in `a` and a point in `b`.
fn min_pairwise(a: &[Point], b: &[Point]) -> f64 {
    a.iter()
        .flat_map(|p| b.iter().map(move |q| p.distance(*q)))
        .fold(f64::INFINITY, f64::min)
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "center" => Ok(Self::Center),
            "corners" => Ok(Self::Corners),
            "edges" => Ok(Self::Edges),
            _ => Err(Error::UnknownDistanceMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn center_distance() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(300.0, 400.0, 100.0, 100.0);
        assert_eq!(DistanceMethod::Center.distance(&a, &b), 500.0);
    }

    #[test]
    fn corner_distance_uses_nearest_pair() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(103.0, 104.0, 10.0, 10.0);
        // bottom-right of a to top-left of b
        assert_eq!(DistanceMethod::Corners.distance(&a, &b), 5.0);
    }

    #[test]
    fn edge_distance_uses_nearest_midpoints() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(150.0, 0.0, 100.0, 100.0);
        // right midpoint of a to left midpoint of b
        assert_eq!(DistanceMethod::Edges.distance(&a, &b), 50.0);
        assert_eq!(DistanceMethod::Center.distance(&a, &b), 150.0);
    }

    #[test]
    fn parse() -> Result<()> {
        assert_eq!("corners".parse::<DistanceMethod>()?, DistanceMethod::Corners);
        assert_eq!("EDGES".parse::<DistanceMethod>()?, DistanceMethod::Edges);
        assert!("manhattan".parse::<DistanceMethod>().is_err());
        assert_eq!(DistanceMethod::default(), DistanceMethod::Center);
        Ok(())
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0..500.0f64, -500.0..500.0f64, 0.0..300.0f64, 0.0..300.0f64)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    fn method_strategy() -> impl Strategy<Value = DistanceMethod> {
        prop_oneof![
            Just(DistanceMethod::Center),
            Just(DistanceMethod::Corners),
            Just(DistanceMethod::Edges),
        ]
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in rect_strategy(), b in rect_strategy(), m in method_strategy()) {
            let ab = m.distance(&a, &b);
            let ba = m.distance(&b, &a);
            prop_assert!(ab >= 0.0);
            prop_assert!((ab - ba).abs() < 1e-9);
        }

        #[test]
        fn distance_to_self_is_zero(a in rect_strategy(), m in method_strategy()) {
            prop_assert_eq!(m.distance(&a, &a), 0.0);
        }
    }
}
