quantity!(Cost, suffix: "", precision: 2);

impl Cost {
    pub const ONE_CENT: Self = Self(0.01);

    /// Round the cost to whole cents.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        self.round_to(2)
    }
}
