use crate::car::Car;
use std::collections::HashMap;

/// The cars found sharing one grid cell after a tick.
///
/// A cell with three or more occupants produces a single record naming all of
/// them, not one record per pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollisionRecord {
    /// The 1-based tick after which the cell was shared.
    pub tick: usize,
    /// The shared cell.
    pub location: (i64, i64),
    /// The names of every car in the cell, in registration order.
    pub cars: Vec<String>,
}

/// Groups un-collided cars by cell and reports every cell with two or more
/// occupants. Cars already marked collided keep their final position but no
/// longer take part in new collisions.
///
/// Both the records and the names within a record follow the order the cars
/// were registered, so output is reproducible.
pub fn detect(cars: &[Car], tick: usize) -> Vec<CollisionRecord> {
    let mut occupants: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    let mut cells_in_order = Vec::new();

    for (index, car) in cars.iter().enumerate() {
        if car.is_collided() {
            continue;
        }

        let cell = car.position();
        let group = occupants.entry(cell).or_insert_with(|| {
            cells_in_order.push(cell);
            Vec::new()
        });
        group.push(index);
    }

    cells_in_order
        .into_iter()
        .filter_map(|cell| {
            let group = &occupants[&cell];
            if group.len() < 2 {
                return None;
            }

            Some(CollisionRecord {
                tick,
                location: cell,
                cars: group
                    .iter()
                    .map(|&index| cars[index].name().to_string())
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car::Direction;

    fn car_at(name: &str, x: i64, y: i64) -> Car {
        Car::new(name, x, y, Direction::North, Vec::new())
    }

    #[test]
    fn when_no_cars_share_a_cell_no_collisions_are_reported() {
        let cars = vec![car_at("A", 0, 0), car_at("B", 1, 1), car_at("C", 2, 2)];

        assert!(detect(&cars, 1).is_empty());
    }

    #[test]
    fn when_three_cars_share_a_cell_a_single_record_names_all_of_them() {
        let cars = vec![car_at("A", 4, 4), car_at("B", 4, 4), car_at("C", 4, 4)];

        let records = detect(&cars, 3);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tick, 3);
        assert_eq!(records[0].location, (4, 4));
        assert_eq!(records[0].cars, vec!["A", "B", "C"]);
    }

    #[test]
    fn when_several_cells_are_shared_the_records_follow_registration_order() {
        // B's cell is seen before C joins A's cell, but A registered first.
        let cars = vec![
            car_at("A", 0, 0),
            car_at("B", 1, 1),
            car_at("C", 0, 0),
            car_at("D", 1, 1),
        ];

        let records = detect(&cars, 1);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].location, (0, 0));
        assert_eq!(records[0].cars, vec!["A", "C"]);
        assert_eq!(records[1].location, (1, 1));
        assert_eq!(records[1].cars, vec!["B", "D"]);
    }

    #[test]
    fn when_a_car_is_already_collided_it_is_left_out_of_new_collisions() {
        let mut wreck = car_at("A", 2, 2);
        wreck.mark_collided(1);
        let cars = vec![wreck, car_at("B", 2, 2)];

        assert!(detect(&cars, 2).is_empty());
    }
}
