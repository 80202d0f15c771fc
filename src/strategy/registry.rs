use itertools::Itertools;

use crate::{
    billing::{BillingRule, Flat, NightDiscount, TimeOfUse},
    prelude::*,
    redistribution::{Algorithm, Targets, TopNPeakShift},
    strategy::Strategy,
};

const ELLEVIO_GUIDANCE: &[&str] = &[
    "Ellevio räknar effektavgiften på snittet av månadens tre högsta timmar, från tre olika dagar.",
    "Mellan 22:00 och 06:00 räknas bara halva förbrukningen, så flytta tunga laster till natten.",
    "Ladda elbilen och kör tvätt och disk nattetid i stället för på eftermiddagen.",
    "Undvik att starta flera energikrävande apparater samtidigt.",
    "Övervaka dina energiförbrukningsmönster regelbundet.",
];

const GE_GUIDANCE: &[&str] = &[
    "Göteborgs Energi rekommenderar att optimera din energiförbrukning.",
    "Minska energianvändningen under högbelastningstimmar för att spara kostnader.",
    "Flytta energikrävande aktiviteter till lågbelastningstimmar.",
    "Övervaka dina energiförbrukningsmönster regelbundet.",
    "Överväg att använda energieffektiva apparater.",
    "Optimera din energianvändning för att sänka effektavgifterna.",
];

const GE_TOU_GUIDANCE: &[&str] = &[
    "Minska energianvändningen under högprisperioder (vardagar 07:00–20:00, november–mars) för att spara kostnader.",
    "Flytta energikrävande aktiviteter till lågbelastningstimmar, helger eller röda dagar då effektavgiften är 0 kr.",
    "Överväg att välja en tidsindelad elnätsavgift om du kan planera din energianvändning till lågpristimmar.",
    "Välj en effektgräns som passar din förbrukning (6 kW, 14 kW eller 43 kW) för att optimera dina kostnader.",
    "Tänk på att om du överstiger din valda effektgräns mer än tre gånger, kommer du att flyttas tillbaka till den ordinarie prismodellen.",
    "Övervaka dina energiförbrukningsmönster regelbundet för att identifiera toppar och optimera användningen.",
    "Överväg att använda energieffektiva apparater för att minska din energiförbrukning under högprisperioder.",
    "Läs mer om den tidsindelade elnätsavgiften här: https://www.goteborgenergi.se/privat/elnat/nya-elnatsavgiftsmodellen",
];

/// Immutable set of the known provider strategies.
#[must_use]
#[derive(Clone, Debug)]
pub struct Registry(Vec<Strategy>);

impl Default for Registry {
    fn default() -> Self {
        Self(vec![
            Self::strategy("Ellevio", "Ellevio", NightDiscount::default().into(), ELLEVIO_GUIDANCE),
            Self::strategy("GE", "Göteborg Energi", Flat::default().into(), GE_GUIDANCE),
            Strategy {
                additional_information: Some(
                    "Detta gäller för den nya GE elprismodellen. läs mer här: https://www.goteborgenergi.se/privat/elnat/nya-elnatsavgiftsmodellen",
                ),
                ..Self::strategy(
                    "GE-TOU",
                    "Göteborg Energi (tidsindelad)",
                    TimeOfUse::default().into(),
                    GE_TOU_GUIDANCE,
                )
            },
        ])
    }
}

impl Registry {
    /// Case-sensitive lookup, unknown identifiers are an error.
    pub fn resolve(&self, id: &str) -> Result<&Strategy> {
        self.0.iter().find(|strategy| strategy.id == id).with_context(|| {
            format!("no such provider: `{id}` (known: {})", self.ids().join(", "))
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        self.0.iter().map(|strategy| strategy.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.0.iter()
    }

    /// Top-N peak shift aimed at the rule's cheap slots, ranked as the non-night rules rank them.
    fn strategy(
        id: &'static str,
        name: &'static str,
        rule: BillingRule,
        guidance: &'static [&'static str],
    ) -> Strategy {
        let algorithm = TopNPeakShift::builder()
            .targets(Targets::for_rule(&rule))
            .ranking(rule.ranking())
            .build();
        Strategy {
            id,
            name,
            rule,
            algorithm: Algorithm::TopN(algorithm),
            guidance,
            additional_information: None,
        }
    }
}
