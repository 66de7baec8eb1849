//! Descriptive appliance dimensions. They never take part in the energy calculation.

quantity!(Inches, suffix: "\"", precision: 1);
quantity!(Kilograms, suffix: " kg", precision: 1);
