pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod curveerror;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod piecewisepolynomial;
            pub mod bspline;
        }
    }
    pub mod grid;
    pub mod extremum;
}

pub mod smoothing {
    pub mod smoothingerror;
    pub mod smoothingmethod;
    pub mod smoothingrequest;
    pub mod smoothedcurve;
    pub mod curvecomparison;
    pub mod curvesmoother;
    pub mod sampleseries;
    pub mod smoothingprofile;
}
