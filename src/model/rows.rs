use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::intervention::Intervention;
use super::property::Property;
use super::reservation::Reservation;

/// An intervention welded to a reservation in the same row.
///
/// `stack_index` counts earlier interventions linked to the same reservation;
/// the renderer offsets each one downward by it so none of them hide another.
#[derive(Debug, Clone)]
pub struct LinkedIntervention {
    pub intervention: Intervention,
    pub reservation_id: Uuid,
    pub stack_index: usize,
}

/// One property plus its grouped records, rebuilt from the filtered record
/// sets on every render.
#[derive(Debug, Clone)]
pub struct PropertyRow {
    pub property: Property,
    pub reservations: Vec<Reservation>,
    pub linked: Vec<LinkedIntervention>,
    pub standalone: Vec<Intervention>,
}

/// Partition one property's interventions into linked and standalone.
///
/// Linked means the `linked_reservation_id` resolves inside this property's
/// reservation lookup. A link to a reservation of another property, or to one
/// removed by the active filters, demotes the intervention to standalone; the
/// reservation may simply be filtered out, so this is a fallback rather than
/// an error.
pub fn split_property_records(
    property_id: Uuid,
    reservations: &[Reservation],
    interventions: &[Intervention],
) -> (Vec<Reservation>, Vec<LinkedIntervention>, Vec<Intervention>) {
    let own_reservations: Vec<Reservation> = reservations
        .iter()
        .filter(|r| r.property_id == property_id)
        .cloned()
        .collect();
    let lookup: HashSet<Uuid> = own_reservations.iter().map(|r| r.id).collect();

    let mut linked = Vec::new();
    let mut standalone = Vec::new();
    let mut per_reservation: HashMap<Uuid, usize> = HashMap::new();

    for iv in interventions.iter().filter(|i| i.property_id == property_id) {
        match iv.linked_reservation_id.filter(|id| lookup.contains(id)) {
            Some(reservation_id) => {
                let stack_index = per_reservation.entry(reservation_id).or_insert(0);
                linked.push(LinkedIntervention {
                    intervention: iv.clone(),
                    reservation_id,
                    stack_index: *stack_index,
                });
                *stack_index += 1;
            }
            None => standalone.push(iv.clone()),
        }
    }

    (own_reservations, linked, standalone)
}

/// Build the rows for one page of properties.
pub fn assemble_rows(
    properties: &[Property],
    reservations: &[Reservation],
    interventions: &[Intervention],
) -> Vec<PropertyRow> {
    properties
        .iter()
        .map(|property| {
            let (reservations, linked, standalone) =
                split_property_records(property.id, reservations, interventions);
            PropertyRow {
                property: property.clone(),
                reservations,
                linked,
                standalone,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::intervention::InterventionKind;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn resolvable_links_are_linked() {
        let prop = Property::new("Apt 1", "1 Main St", "Porto");
        let res = Reservation::new(prop.id, "Ada", date(2024, 3, 10), date(2024, 3, 12));
        let mut iv = Intervention::new(prop.id, InterventionKind::Cleaning, "Marta", date(2024, 3, 12));
        iv.linked_reservation_id = Some(res.id);

        let (r, linked, standalone) =
            split_property_records(prop.id, &[res.clone()], &[iv]);
        assert_eq!(r.len(), 1);
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].reservation_id, res.id);
        assert!(standalone.is_empty());
    }

    #[test]
    fn dangling_link_falls_back_to_standalone() {
        let prop = Property::new("Apt 1", "1 Main St", "Porto");
        let mut iv = Intervention::new(prop.id, InterventionKind::Cleaning, "Marta", date(2024, 3, 12));
        iv.linked_reservation_id = Some(Uuid::new_v4());

        let (_, linked, standalone) = split_property_records(prop.id, &[], &[iv]);
        assert!(linked.is_empty());
        assert_eq!(standalone.len(), 1);
    }

    #[test]
    fn link_to_other_property_is_standalone() {
        let prop_a = Property::new("Apt A", "1 Main St", "Porto");
        let prop_b = Property::new("Apt B", "2 Main St", "Porto");
        let res_b = Reservation::new(prop_b.id, "Ada", date(2024, 3, 10), date(2024, 3, 12));
        let mut iv = Intervention::new(prop_a.id, InterventionKind::Cleaning, "Marta", date(2024, 3, 12));
        iv.linked_reservation_id = Some(res_b.id);

        let (_, linked, standalone) =
            split_property_records(prop_a.id, &[res_b], &[iv]);
        assert!(linked.is_empty());
        assert_eq!(standalone.len(), 1);
    }

    #[test]
    fn multiple_links_to_one_reservation_stack() {
        let prop = Property::new("Apt 1", "1 Main St", "Porto");
        let res = Reservation::new(prop.id, "Ada", date(2024, 3, 10), date(2024, 3, 12));
        let mut a = Intervention::new(prop.id, InterventionKind::Cleaning, "Marta", date(2024, 3, 12));
        let mut b = Intervention::new(prop.id, InterventionKind::Maintenance, "Rui", date(2024, 3, 12));
        a.linked_reservation_id = Some(res.id);
        b.linked_reservation_id = Some(res.id);

        let (_, linked, _) = split_property_records(prop.id, &[res], &[a, b]);
        assert_eq!(linked.len(), 2);
        assert_eq!(linked[0].stack_index, 0);
        assert_eq!(linked[1].stack_index, 1);
    }

    #[test]
    fn rows_only_contain_own_records() {
        let prop_a = Property::new("Apt A", "1 Main St", "Porto");
        let prop_b = Property::new("Apt B", "2 Main St", "Porto");
        let res_a = Reservation::new(prop_a.id, "Ada", date(2024, 3, 10), date(2024, 3, 12));
        let res_b = Reservation::new(prop_b.id, "Grace", date(2024, 3, 11), date(2024, 3, 14));
        let rows = assemble_rows(
            &[prop_a.clone(), prop_b.clone()],
            &[res_a, res_b],
            &[],
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].reservations.len(), 1);
        assert_eq!(rows[0].reservations[0].property_id, prop_a.id);
        assert_eq!(rows[1].reservations[0].property_id, prop_b.id);
    }
}
