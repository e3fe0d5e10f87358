//! Pure aggregation of assessment impact figures.

use serde::{Deserialize, Serialize};
use shared_types::{GeoPoint, SubmittedRecord};

use super::quantity::leading_quantity;

/// Summed impact of every assessment linked to one incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationImpact {
    pub lives_lost: u64,
    pub injured: u64,
    pub displaced: u64,
    pub houses_affected: u64,
    pub schools_affected: u64,
    pub medical_facilities_affected: u64,
    pub agricultural_land: f64,
    /// Mean coordinate of the geo-tagged assessments.
    pub epicenter: Option<GeoPoint>,
    pub assessment_count: usize,
}

/// Fold `assessments` into one snapshot.
///
/// Missing figures count as zero and assessments without coordinates are left
/// out of the epicenter only. Floats accumulate in record-id order so the
/// output does not depend on the order the store returned rows in.
pub fn aggregate(assessments: &[SubmittedRecord]) -> PopulationImpact {
    let mut ordered: Vec<&SubmittedRecord> = assessments.iter().collect();
    ordered.sort_by_key(|record| record.id);

    let mut impact = PopulationImpact {
        assessment_count: ordered.len(),
        ..PopulationImpact::default()
    };
    let (mut lat_sum, mut lng_sum, mut located) = (0.0_f64, 0.0_f64, 0_u32);

    for record in ordered {
        if let Some(point) = record.payload.coordinates {
            lat_sum += point.lat;
            lng_sum += point.lng;
            located += 1;
        }

        let Some(figures) = &record.payload.impact else {
            continue;
        };
        let add = |total: &mut u64, value: Option<u64>| {
            *total = total.saturating_add(value.unwrap_or(0));
        };
        add(&mut impact.lives_lost, figures.lives_lost);
        add(&mut impact.injured, figures.injured);
        add(&mut impact.displaced, figures.displaced);
        add(&mut impact.houses_affected, figures.houses_affected);
        add(&mut impact.schools_affected, figures.schools_affected);
        add(
            &mut impact.medical_facilities_affected,
            figures.medical_facilities_affected,
        );
        if let Some(land) = &figures.agricultural_land_affected {
            impact.agricultural_land += leading_quantity(land);
        }
    }

    if located > 0 {
        let n = f64::from(located);
        impact.epicenter = Some(GeoPoint::new(lat_sum / n, lng_sum / n));
    }
    impact
}
