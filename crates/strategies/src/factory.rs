use crate::balanced::Balanced;
use crate::bear::Bear;
use crate::bull::Bull;
use crate::competitor::Competitor;
use crate::lateral::Lateral;
use crate::penetration::Penetration;
use crate::types::{MarketCondition, StrategySettings};
use crate::{Result, Strategy};

/// Creates the strategy for a market condition.
///
/// This is the single dispatch point from condition to policy. The match is
/// exhaustive, so adding a condition without a strategy does not compile.
pub fn create_strategy(
    condition: MarketCondition,
    settings: &StrategySettings,
) -> Box<dyn Strategy + Send + Sync> {
    let base = settings.balanced;
    match condition {
        MarketCondition::Balanced => Box::new(Balanced::new(base)),
        MarketCondition::Bull => Box::new(Bull::new(base, settings.bull)),
        MarketCondition::Bear => Box::new(Bear::new(base, settings.bear)),
        MarketCondition::Lateral => Box::new(Lateral::new(base, settings.lateral)),
        MarketCondition::Penetration => Box::new(Penetration::new(base, settings.penetration)),
        MarketCondition::Competitor => Box::new(Competitor::new(base, settings.competitor)),
    }
}

/// Parses a market-condition identifier and creates its strategy.
pub fn create_strategy_by_name(
    name: &str,
    settings: &StrategySettings,
) -> Result<Box<dyn Strategy + Send + Sync>> {
    let condition: MarketCondition = name.parse()?;
    Ok(create_strategy(condition, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn every_condition_gets_its_own_strategy() {
        let settings = StrategySettings::default();
        for condition in MarketCondition::ALL {
            assert_eq!(create_strategy(condition, &settings).condition(), condition);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let result = create_strategy_by_name("hyperbullish", &StrategySettings::default());
        assert!(matches!(result, Err(Error::UnknownMarketCondition(name)) if name == "hyperbullish"));
    }

    #[test]
    fn aliases_resolve_through_the_factory() {
        let strategy = create_strategy_by_name("market_penetration", &StrategySettings::default())
            .map(|s| s.condition());
        assert_eq!(strategy, Ok(MarketCondition::Penetration));
    }
}
