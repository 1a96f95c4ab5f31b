use aero_core::Itinerary;

/// Sum of `numberOfStops` across the leg's segments
pub fn total_stops(leg: &Itinerary) -> u32 {
    leg.total_stops()
}

pub fn stop_text(stops: u32) -> String {
    match stops {
        0 => "Nonstop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{} stops", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::OfferBuilder;

    #[test]
    fn test_stop_text() {
        assert_eq!(stop_text(0), "Nonstop");
        assert_eq!(stop_text(1), "1 stop");
        assert_eq!(stop_text(3), "3 stops");
    }

    #[test]
    fn test_total_stops_over_segments() {
        let offer = OfferBuilder::new("1").stops(1).connection("CDG").build();
        // the connecting segment copies the first segment's stop count
        assert_eq!(total_stops(&offer.itineraries[0]), 2);

        let nonstop = OfferBuilder::new("2").build();
        assert_eq!(stop_text(total_stops(&nonstop.itineraries[0])), "Nonstop");
    }
}
