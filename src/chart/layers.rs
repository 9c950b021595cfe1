use crate::chart::DisplayOptions;
use crate::chart::payload::{
    AreaStyle, BandKind, BandPoint, BandSeries, CandleRecord, ChartPayload, LinePoint, Marker,
    MarkerPosition, MarkerShape,
};
use crate::config::plot::CHART_CONFIG;
use crate::domain::Direction;
use crate::models::{Row, Table};

/// Context passed to every layer during building.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub table: &'a Table,
    pub options: &'a DisplayOptions,
    /// Pre-formatted `time` field, one per row
    pub times: &'a [String],
}

impl<'a> LayerContext<'a> {
    fn rows_with_time(&self) -> impl Iterator<Item = (&'a Row, &'a String)> {
        self.table.iter().zip(self.times.iter())
    }
}

/// A standardized layer in the chart stack.
pub trait ChartLayer {
    fn apply(&self, payload: &mut ChartPayload, ctx: &LayerContext);
}

// ============================================================================
// 1. CANDLES (always on)
// ============================================================================
pub struct CandleLayer;

impl ChartLayer for CandleLayer {
    fn apply(&self, payload: &mut ChartPayload, ctx: &LayerContext) {
        payload.candles = ctx
            .rows_with_time()
            .map(|(row, time)| CandleRecord {
                time: time.clone(),
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
            })
            .collect();
    }
}

// ============================================================================
// 2. MOVING AVERAGE LINE
// ============================================================================
pub struct MovingAverageLayer;

impl ChartLayer for MovingAverageLayer {
    fn apply(&self, payload: &mut ChartPayload, ctx: &LayerContext) {
        if !ctx.options.show_moving_average {
            return;
        }
        // Undefined values are dropped, never zero-filled
        let points = ctx
            .rows_with_time()
            .filter_map(|(row, time)| {
                row.moving_average_20.map(|value| LinePoint {
                    time: time.clone(),
                    value,
                })
            })
            .collect();
        payload.moving_average = Some(points);
    }
}

// ============================================================================
// 3. SUPPORT / RESISTANCE BANDS
// ============================================================================
pub struct BandLayer;

impl BandLayer {
    fn bounds(row: &Row, kind: BandKind) -> (f64, f64) {
        match kind {
            BandKind::Support => (row.support_min, row.support_max),
            BandKind::Resistance => (row.resistance_min, row.resistance_max),
        }
    }

    fn series(ctx: &LayerContext, kind: BandKind) -> BandSeries {
        let colors = match kind {
            BandKind::Support => &CHART_CONFIG.support_band,
            BandKind::Resistance => &CHART_CONFIG.resistance_band,
        };

        let data = ctx
            .rows_with_time()
            .map(|(row, time)| {
                let (low, high) = Self::bounds(row, kind);
                BandPoint {
                    time: time.clone(),
                    low,
                    high,
                }
            })
            .collect();

        BandSeries {
            kind,
            style: AreaStyle::from(colors),
            data,
        }
    }
}

impl ChartLayer for BandLayer {
    fn apply(&self, payload: &mut ChartPayload, ctx: &LayerContext) {
        if !ctx.options.show_bands {
            return;
        }
        payload.bands = vec![
            Self::series(ctx, BandKind::Support),
            Self::series(ctx, BandKind::Resistance),
        ];
    }
}

// ============================================================================
// 4. DIRECTION MARKERS
// ============================================================================
pub struct MarkerLayer;

impl MarkerLayer {
    /// Appearance is a pure function of direction.
    pub fn appearance(direction: Direction) -> (MarkerPosition, &'static str, MarkerShape) {
        let colors = &CHART_CONFIG.markers;
        match direction {
            Direction::Long => (MarkerPosition::BelowBar, colors.long, MarkerShape::ArrowUp),
            Direction::Short => (MarkerPosition::AboveBar, colors.short, MarkerShape::ArrowDown),
            Direction::Neutral => (MarkerPosition::InBar, colors.neutral, MarkerShape::Circle),
        }
    }
}

impl ChartLayer for MarkerLayer {
    fn apply(&self, payload: &mut ChartPayload, ctx: &LayerContext) {
        if !ctx.options.show_markers {
            return;
        }
        let markers = ctx
            .rows_with_time()
            .map(|(row, time)| {
                let (position, color, shape) = Self::appearance(row.direction);
                Marker {
                    time: time.clone(),
                    position,
                    color: color.to_string(),
                    shape,
                }
            })
            .collect();
        payload.markers = Some(markers);
    }
}
