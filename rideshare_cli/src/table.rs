use comfy_table::{
    Cell, CellAlignment, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};
use rideshare_costs::{
    allocator::CostBreakdown, metrics::RideMetrics, model::RouteSegment, session::RideSession,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn amount(value: f64) -> Cell {
    Cell::new(format!("{:.2}", value)).set_alignment(CellAlignment::Right)
}

fn distance(segment: &RouteSegment) -> Cell {
    let label = if segment.was_estimated() {
        format!("{:.1} (estimated)", segment.distance_km())
    } else {
        format!("{:.1}", segment.distance_km())
    };
    Cell::new(label).set_alignment(CellAlignment::Right)
}

pub fn segment_table(segment: &RouteSegment) -> Table {
    let mut table = new_table();
    table
        .set_header(vec!["", "Address", "Lat", "Lng"])
        .add_row(vec![
            Cell::new("Start"),
            Cell::new(segment.start().address()),
            Cell::new(segment.start().lat()),
            Cell::new(segment.start().lng()),
        ])
        .add_row(vec![
            Cell::new("End"),
            Cell::new(segment.end().address()),
            Cell::new(segment.end().lat()),
            Cell::new(segment.end().lng()),
        ])
        .add_row(vec![
            Cell::new("Distance (km)"),
            distance(segment),
            Cell::new(""),
            Cell::new(""),
        ]);
    table
}

pub fn breakdown_table(session: &RideSession, breakdown: &CostBreakdown) -> Table {
    let mut table = new_table();
    table
        .set_header(vec!["Who", "From", "To", "Distance (km)", "Cost"])
        .add_row(vec![
            Cell::new("Driver"),
            Cell::new(session.primary().start().address()),
            Cell::new(session.primary().end().address()),
            distance(session.primary()),
            amount(breakdown.primary.base_cost),
        ]);

    for passenger in session.passengers() {
        table.add_row(vec![
            Cell::new(passenger.name()),
            Cell::new(passenger.segment().start().address()),
            Cell::new(passenger.segment().end().address()),
            distance(passenger.segment()),
            amount(passenger.cost()),
        ]);
    }

    table
        .add_row(vec![
            Cell::new("Fuel"),
            Cell::new(format!(
                "{:.2} litres at {:.2}",
                breakdown.total_fuel_litres,
                session.vehicle().fuel_price
            )),
            Cell::new(""),
            Cell::new(""),
            amount(breakdown.primary.fuel_cost),
        ])
        .add_row(vec![
            Cell::new("Maintenance"),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
            amount(breakdown.primary.maintenance_cost),
        ])
        .add_row(vec![
            Cell::new("Total"),
            Cell::new(""),
            Cell::new(""),
            Cell::new(format!("{:.1}", breakdown.total_distance_km))
                .set_alignment(CellAlignment::Right),
            amount(breakdown.total_cost),
        ]);

    table
}

pub fn rides_table(rides: &[RideMetrics]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Id",
        "Created",
        "Route",
        "Passengers",
        "Distance (km)",
        "Total cost",
    ]);

    for ride in rides {
        table.add_row(vec![
            Cell::new(&ride.id),
            Cell::new(ride.created_at.strftime("%Y-%m-%d %H:%M")),
            Cell::new(format!(
                "{} → {}",
                ride.route.start().address(),
                ride.route.end().address()
            )),
            Cell::new(ride.passengers.len()).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", ride.total_distance_km))
                .set_alignment(CellAlignment::Right),
            amount(ride.total_cost),
        ]);
    }

    table
}
