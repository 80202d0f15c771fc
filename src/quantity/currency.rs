quantity!(Kronor, suffix: "kr", precision: 2);
