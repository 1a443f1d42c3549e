// Re-entrancy guard for the toggle: held from the toggle until the cord settles.
#[derive(Default, Debug, Clone)]
pub struct ToggleGuard {
    in_flight: bool,
}

impl ToggleGuard {
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Takes the guard. Returns false if a toggle is already in flight.
    pub fn try_acquire(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn release(&mut self) {
        self.in_flight = false;
    }
}
