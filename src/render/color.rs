use super::DEFAULT_COLOR;
use crate::error::RenderError;
use ahash::AHashMap;
use rand::Rng;

/// Generates `n` hex colors spread evenly around a random starting point.
///
/// Each RGB channel starts at a random value and advances by `256 / n` per color,
/// wrapping at 256. The progression is the same for every run; only the starting
/// point changes.
pub fn generate_colors<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    let step = 256.0 / n as f64;
    let mut rgb: [u32; 3] = std::array::from_fn(|_| rng.random_range(0..256));

    (0..n)
        .map(|_| {
            for channel in &mut rgb {
                *channel = (*channel as f64 + step) as u32 % 256;
            }
            format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
        })
        .collect()
}

/// [`generate_colors`] seeded from the thread-local RNG.
pub fn generate_colors_random(n: usize) -> Vec<String> {
    generate_colors(n, &mut rand::rng())
}

/// Fill color of every flow.
#[derive(Debug, Clone, Default)]
pub struct FlowColors {
    colors: AHashMap<String, String>,
}

impl FlowColors {
    /// Every flow gets [`DEFAULT_COLOR`].
    pub fn plain(flows: &[String]) -> Self {
        Self {
            colors: flows
                .iter()
                .map(|f| (f.clone(), DEFAULT_COLOR.to_string()))
                .collect(),
        }
    }

    /// Every flow gets its own generated color.
    pub fn colorful<R: Rng + ?Sized>(flows: &[String], rng: &mut R) -> Self {
        let colors = generate_colors(flows.len(), rng);
        Self {
            colors: flows.iter().cloned().zip(colors).collect(),
        }
    }

    pub fn get(&self, flow: &str) -> Result<&str, RenderError> {
        self.colors
            .get(flow)
            .map(String::as_str)
            .ok_or_else(|| RenderError::MissingFlowColor(flow.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn is_hex_color(c: &str) -> bool {
        c.len() == 7
            && c.starts_with('#')
            && c[1..].chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase())
    }

    #[test]
    fn every_count_yields_well_formed_colors() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..=40 {
            let colors = generate_colors(n, &mut rng);
            assert_eq!(colors.len(), n);
            assert!(colors.iter().all(|c| is_hex_color(c)), "{:?}", colors);
        }
    }

    #[test]
    fn zero_colors_is_empty() {
        assert!(generate_colors_random(0).is_empty());
    }

    #[test]
    fn colors_are_spread_for_small_counts() {
        let mut rng = StdRng::seed_from_u64(42);
        let colors = generate_colors(4, &mut rng);
        let unique: ahash::AHashSet<_> = colors.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn missing_flow_color_is_an_error() {
        let colors = FlowColors::plain(&["default".to_string()]);
        assert_eq!(colors.get("default").unwrap(), DEFAULT_COLOR);
        assert!(matches!(
            colors.get("shop"),
            Err(RenderError::MissingFlowColor(_))
        ));
    }
}
