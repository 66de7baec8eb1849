quantity!(Hours, suffix: " h", precision: 2);
