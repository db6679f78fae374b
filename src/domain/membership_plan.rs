/// Membership plans offered by the practice.
///
/// Plans are identified by their display name, e.g. `FAMILY PLAN`. Each plan
/// has a fixed, ordered list of feature bullets that is printed in the patient
/// confirmation email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipPlan {
    Essential,
    RoutineCare,
    CompleteCare,
    CompleteCarePlus,
    PerioCare,
    Family,
}

impl MembershipPlan {
    pub const ALL: [MembershipPlan; 6] = [
        MembershipPlan::Essential,
        MembershipPlan::RoutineCare,
        MembershipPlan::CompleteCare,
        MembershipPlan::CompleteCarePlus,
        MembershipPlan::PerioCare,
        MembershipPlan::Family,
    ];

    /// The plan name as used by the signup form.
    pub fn name(self) -> &'static str {
        match self {
            MembershipPlan::Essential => "ESSENTIAL PLAN",
            MembershipPlan::RoutineCare => "ROUTINE CARE PLAN",
            MembershipPlan::CompleteCare => "COMPLETE CARE PLAN",
            MembershipPlan::CompleteCarePlus => "COMPLETE CARE PLUS PLAN",
            MembershipPlan::PerioCare => "PERIO CARE PLAN",
            MembershipPlan::Family => "FAMILY PLAN",
        }
    }

    /// Look up a plan by name, ignoring surrounding whitespace and ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|plan| plan.name().eq_ignore_ascii_case(name))
    }

    pub fn features(self) -> &'static [&'static str] {
        match self {
            MembershipPlan::Essential => &[
                "1 dental examination per year",
                "1 hygienist clean (scale & polish) per year",
                "Worldwide dental accident & emergency cover",
                "10% off any additional general treatment",
            ],
            MembershipPlan::RoutineCare => &[
                "2 dental examinations per year",
                "1 hygienist clean (scale & polish) per year",
                "Routine X-rays as clinically required",
                "Worldwide dental accident & emergency cover",
                "10% off any additional general treatment",
            ],
            MembershipPlan::CompleteCare => &[
                "2 dental examinations per year",
                "2 hygienist cleans (scale & polish) per year",
                "Routine X-rays as clinically required",
                "Worldwide dental accident & emergency cover",
                "10% off any additional general treatment",
            ],
            MembershipPlan::CompleteCarePlus => &[
                "2 dental examinations per year",
                "2 hygienist cleans (scale & polish) per year",
                "1 free emergency appointment per year",
                "20% off Airflow stain removal",
                "Routine X-rays as clinically required",
                "Worldwide dental accident & emergency cover",
                "10% off any additional general treatment",
            ],
            MembershipPlan::PerioCare => &[
                "2 dental examinations per year",
                "Quarterly periodontal hygienist cleaning (4 per year)",
                "Gum health monitoring and periodontal charting",
                "Worldwide dental accident & emergency cover",
                "10% off any additional general treatment",
            ],
            MembershipPlan::Family => &[
                "Adults covered on Complete Care terms: 2 examinations and 2 hygienist cleans per year",
                "Children under 18 included at no extra cost",
                "10% discount for siblings living at the same address",
                "One simple monthly payment for the whole family",
                "Worldwide dental accident & emergency cover for every member",
            ],
        }
    }
}

/// Feature bullets for a plan name. Unknown plan names have no features.
pub fn plan_features(plan_name: &str) -> &'static [&'static str] {
    match MembershipPlan::from_name(plan_name) {
        Some(plan) => plan.features(),
        None => &[],
    }
}
