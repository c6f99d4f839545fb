//! Text printed before the map opens
use std::io::{self, Write};

use crate::model::{Coordinate, CrewMember};

pub fn print_roster(out: &mut impl Write, people: &[CrewMember]) -> io::Result<()> {
    writeln!(out, "\nCurrent number of people in space: {}", people.len())?;

    for person in people {
        writeln!(out, " - {} in {}", person.name, person.craft)?;
    }

    Ok(())
}

pub fn print_location(out: &mut impl Write, location: Coordinate) -> io::Result<()> {
    writeln!(out, "\nCurrent ISS Coords:  {location}")
}
