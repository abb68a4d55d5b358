use tracing::{debug, info};

use crate::color::Rgba;
use crate::config::{Config, RingRadii};

use super::angles::AngleMap;
use super::ticks::{format_value, LabelRule, TickPlanner};
use super::{
    axis_samples, ArcSegment, AxisSample, DomainError, Gauge, LabelKind, Ring, RingKind, TickLabel,
};

/// Vertical offsets of the three legend lines below the center.
const CAPTION_OFFSETS: [f64; 3] = [-0.1, -0.2, -0.3];

/// Minutes needed to cover `distance_km` at `speed_kmh`.
pub fn minutes_per_distance(distance_km: f64, speed_kmh: f64) -> f64 {
    distance_km / (speed_kmh / 60.0)
}

/// Build the complete gauge for one configuration.
pub fn render(config: &Config) -> Result<Gauge, DomainError> {
    let samples = axis_samples(config.axis.start, config.axis.stop, config.axis.step)?;
    let n = samples.len();
    let model = config.physics.third_axis();

    let speeds: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let minutes: Vec<f64> = speeds
        .iter()
        .map(|&v| minutes_per_distance(config.axis.reference_distance_km, v))
        .collect();
    let third: Vec<f64> = speeds
        .iter()
        .map(|&v| model.compute_value(v))
        .collect::<Result<_, _>>()?;

    let angles = AngleMap::new(config.geometry.span(), n);
    let geometry = &config.geometry;

    let outer = build_ring(
        RingKind::Outer,
        &samples,
        &angles,
        geometry.outer,
        config.colors.outer.sample(n),
        TickPlanner::new(&angles, geometry.outer.label).plan(
            &speeds,
            LabelRule::MultipleOf(10.0),
            format_value,
        ),
    );

    let middle = build_ring(
        RingKind::Middle,
        &samples,
        &angles,
        geometry.middle,
        config.colors.middle.sample(n),
        TickPlanner::new(&angles, geometry.middle.label).plan(
            &minutes,
            LabelRule::Integral,
            format_value,
        ),
    );

    let inner_gradient = config
        .colors
        .inner
        .clone()
        .unwrap_or_else(|| model.default_gradient());
    let inner = build_ring(
        RingKind::Inner,
        &samples,
        &angles,
        geometry.inner,
        inner_gradient.sample(n),
        TickPlanner::new(&angles, geometry.inner.label).plan(&third, model.label_rule(), |v| {
            model.format_label(v)
        }),
    );

    let captions = [
        "Top: Speed (km/h)".to_string(),
        format!(
            "Middle: Minutes per {} km",
            format_value(config.axis.reference_distance_km)
        ),
        model.caption().to_string(),
    ]
    .into_iter()
    .zip(CAPTION_OFFSETS)
    .map(|(text, y)| TickLabel {
        text,
        position: (0.0, y),
        radius: 0.0,
        kind: LabelKind::Caption,
    })
    .collect();

    info!(
        "Composed {:?} gauge: {} samples from {} to {} km/h",
        config.physics.variant,
        n,
        speeds[0],
        speeds[n - 1]
    );

    Ok(Gauge {
        rings: [outer, middle, inner],
        captions,
    })
}

fn build_ring(
    kind: RingKind,
    samples: &[AxisSample],
    angles: &AngleMap,
    radii: RingRadii,
    colors: Vec<Rgba>,
    labels: Vec<TickLabel>,
) -> Ring {
    // The last sample's color closes the gradient but has no segment of its own.
    let segments: Vec<ArcSegment> = samples
        .windows(2)
        .map(|pair| ArcSegment {
            start: angles.arc_position(pair[0].index),
            end: angles.arc_position(pair[1].index),
            color: colors[pair[0].index],
            radius: radii.arc,
        })
        .collect();

    debug!(
        "{} ring: {} segments, {} labels at radius {}",
        kind.name(),
        segments.len(),
        labels.len(),
        radii.label
    );

    Ring {
        kind,
        radius: radii.arc,
        label_radius: radii.label,
        segments,
        labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::gauge::gradient::GradientSpec;

    fn texts(labels: &[TickLabel]) -> Vec<&str> {
        labels.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_reference_gauge_counts() {
        let gauge = render(&Config::default()).unwrap();
        for ring in &gauge.rings {
            assert_eq!(ring.segments.len(), 14);
        }
        assert_eq!(gauge.rings[0].labels.len(), 15);
        assert_eq!(gauge.rings[2].labels.len(), 15);
        assert_eq!(gauge.captions.len(), 3);
    }

    #[test]
    fn test_segments_are_contiguous() {
        let gauge = render(&Config::default()).unwrap();
        for ring in &gauge.rings {
            assert!(ring.segments.windows(2).all(|w| w[0].end == w[1].start));
            assert!(ring.segments.iter().all(|s| s.radius == ring.radius));
        }
    }

    #[test]
    fn test_segment_i_spans_samples_i_and_next() {
        let config = Config::default();
        let gauge = render(&config).unwrap();
        let angles = AngleMap::new(config.geometry.span(), 15);
        let colors = config.colors.outer.sample(15);
        for (i, segment) in gauge.rings[0].segments.iter().enumerate() {
            assert_eq!(segment.start, angles.arc_position(i));
            assert_eq!(segment.end, angles.arc_position(i + 1));
            assert_eq!(segment.color, colors[i]);
        }
    }

    #[test]
    fn test_outer_labels_read_in_reverse_of_arc() {
        let config = Config::default();
        let gauge = render(&config).unwrap();
        let outer = &gauge.rings[0];
        assert_eq!(outer.labels[0].text, "10");
        assert_eq!(outer.labels[14].text, "150");

        // The "10" label sits at the far end of the drawn arc.
        let last = outer.segments[13];
        let (x, y) = crate::gauge::angles::polar_to_cartesian(last.end.theta, outer.label_radius);
        assert!((outer.labels[0].position.0 - x).abs() < 1e-12);
        assert!((outer.labels[0].position.1 - y).abs() < 1e-12);
    }

    #[test]
    fn test_middle_labels_whole_minutes() {
        let gauge = render(&Config::default()).unwrap();
        assert_eq!(
            texts(&gauge.rings[1].labels),
            ["60", "30", "20", "15", "12", "10", "6", "5", "4"]
        );
    }

    #[test]
    fn test_inner_car_length_labels() {
        let gauge = render(&Config::default()).unwrap();
        let labels = texts(&gauge.rings[2].labels);
        assert_eq!(labels[0], "1");
        assert_eq!(labels[1], "2.5");
        assert_eq!(labels[4], "8");
        assert_eq!(labels[14], "42");
        assert_eq!(gauge.captions[2].text, "Bottom: Stopping distance (cars)");
    }

    #[test]
    fn test_fuel_variant_labels() {
        let mut config = Config::default();
        config.physics.variant = Variant::FuelEconomy;
        let gauge = render(&config).unwrap();
        assert_eq!(texts(&gauge.rings[2].labels), ["15", "15", "5"]);
        assert_eq!(gauge.captions[2].text, "Bottom: Fuel economy (km/L)");
        // Default fuel palette is symmetric: red ends, green band.
        let inner = &gauge.rings[2].segments;
        assert_eq!(inner[0].color, Rgba::from_rgb8(255, 0, 0));
        assert_eq!(inner[7].color, Rgba::from_rgb8(0, 128, 0));
    }

    #[test]
    fn test_ring_colors_follow_configured_gradients() {
        let gauge = render(&Config::default()).unwrap();
        assert_eq!(gauge.rings[0].segments[0].color, Rgba::from_rgb8(255, 0, 0));
        let middle = &gauge.rings[1].segments;
        assert!(middle[5..10]
            .iter()
            .all(|s| s.color == Rgba::from_rgb8(255, 255, 0)));
        assert_eq!(gauge.rings[2].segments[0].color, Rgba::from_rgb8(255, 0, 0));
    }

    #[test]
    fn test_inner_gradient_override() {
        let mut config = Config::default();
        config.colors.inner = Some(GradientSpec::Linear {
            from: Rgba::from_rgb8(0, 0, 255),
            to: Rgba::from_rgb8(0, 0, 255),
        });
        let gauge = render(&config).unwrap();
        assert!(gauge.rings[2]
            .segments
            .iter()
            .all(|s| s.color == Rgba::from_rgb8(0, 0, 255)));
    }

    #[test]
    fn test_five_kmh_steps() {
        let mut config = Config::default();
        config.axis.start = 5.0;
        config.axis.stop = 155.0;
        config.axis.step = 5.0;
        let gauge = render(&config).unwrap();
        assert_eq!(gauge.rings[0].segments.len(), 30);
        // Only multiples of ten are printed on the speed ring.
        assert_eq!(gauge.rings[0].labels.len(), 15);
        assert_eq!(gauge.rings[0].labels[0].text, "10");
    }

    #[test]
    fn test_minimal_axis() {
        let mut config = Config::default();
        config.axis.start = 10.0;
        config.axis.stop = 20.0;
        let gauge = render(&config).unwrap();
        assert!(gauge.rings.iter().all(|r| r.segments.len() == 1));
    }

    #[test]
    fn test_captions() {
        let mut config = Config::default();
        config.axis.reference_distance_km = 5.0;
        let gauge = render(&config).unwrap();
        assert_eq!(gauge.captions[0].text, "Top: Speed (km/h)");
        assert_eq!(gauge.captions[1].text, "Middle: Minutes per 5 km");
        assert_eq!(gauge.captions[1].position, (0.0, -0.2));
        assert!(gauge.captions.iter().all(|c| c.kind == LabelKind::Caption));
    }

    #[test]
    fn test_domain_error_propagates() {
        let mut config = Config::default();
        config.physics.friction_coeff = -0.1;
        assert!(matches!(
            render(&config),
            Err(DomainError::NonPositiveFriction { .. })
        ));

        let mut config = Config::default();
        config.axis.step = 0.0;
        assert!(matches!(
            render(&config),
            Err(DomainError::DegenerateAxis { .. })
        ));
    }

    #[test]
    fn test_zero_speed_has_no_time_label() {
        let mut config = Config::default();
        config.axis.start = 0.0;
        let gauge = render(&config).unwrap();
        assert!(minutes_per_distance(10.0, 0.0).is_infinite());
        assert_eq!(gauge.rings[1].labels[0].text, "60");
        assert_eq!(gauge.rings[0].labels[0].text, "0");
    }
}
