use serde::{Deserialize, Serialize};

/// 匹配评分权重，六项合计构成100分制
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingWeights {
    pub distance: f64,
    pub availability: f64,
    pub rating: f64,
    pub price: f64,
    pub utilization: f64,
    pub reliability: f64,
}

impl Default for MatchingWeights {
    fn default() -> Self {
        Self {
            distance: 40.0,
            availability: 20.0,
            rating: 15.0,
            price: 10.0,
            utilization: 10.0,
            reliability: 5.0,
        }
    }
}

impl MatchingWeights {
    pub fn total(&self) -> f64 {
        self.distance
            + self.availability
            + self.rating
            + self.price
            + self.utilization
            + self.reliability
    }

    fn as_array(&self) -> [f64; 6] {
        [
            self.distance,
            self.availability,
            self.rating,
            self.price,
            self.utilization,
            self.reliability,
        ]
    }
}

/// 尚无真实遥测数据的评分因子，取值范围 [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingFactors {
    pub distance_fit: f64,
    pub availability: f64,
    pub price_fit: f64,
    pub utilization: f64,
}

impl Default for MatchingFactors {
    fn default() -> Self {
        Self {
            distance_fit: 0.8,
            availability: 1.0,
            price_fit: 1.0,
            utilization: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub weights: MatchingWeights,
    pub factors: MatchingFactors,
    /// 评分满分
    pub rating_scale: f64,
    /// 达到该违约次数时可靠性因子归零
    pub strike_cap: u32,
    pub max_candidates: usize,
    /// 占位距离的随机区间 [min, max)
    pub placeholder_distance_km: (f64, f64),
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: MatchingWeights::default(),
            factors: MatchingFactors::default(),
            rating_scale: 5.0,
            strike_cap: 5,
            max_candidates: 5,
            placeholder_distance_km: (2.0, 6.0),
        }
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.weights.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(anyhow::anyhow!("匹配权重必须为非负数"));
        }

        let factors = [
            self.factors.distance_fit,
            self.factors.availability,
            self.factors.price_fit,
            self.factors.utilization,
        ];
        if factors.iter().any(|f| !(0.0..=1.0).contains(f)) {
            return Err(anyhow::anyhow!("占位评分因子必须位于 [0, 1] 区间"));
        }

        if !(self.rating_scale > 0.0) {
            return Err(anyhow::anyhow!("评分满分必须大于0"));
        }

        if self.strike_cap == 0 {
            return Err(anyhow::anyhow!("违约上限必须大于0"));
        }

        if self.max_candidates == 0 {
            return Err(anyhow::anyhow!("候选人数上限必须大于0"));
        }

        let (min, max) = self.placeholder_distance_km;
        if !(min >= 0.0 && min < max) {
            return Err(anyhow::anyhow!("占位距离区间无效: [{min}, {max})"));
        }

        Ok(())
    }
}

/// 邀约生命周期策略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferPolicyConfig {
    pub default_expires_in_minutes: u32,
    pub max_expires_in_minutes: u32,
    /// 接受时拒绝已过期的邀约
    pub enforce_expiry_on_accept: bool,
    /// 仅允许拒绝 SENT 状态的邀约（REJECTED 视为幂等）
    pub strict_reject: bool,
    /// 旧邀约全部为 REJECTED/EXPIRED 时允许重新发送
    pub resend_after_terminal: bool,
}

impl Default for OfferPolicyConfig {
    fn default() -> Self {
        Self {
            default_expires_in_minutes: 60,
            max_expires_in_minutes: 7 * 24 * 60,
            enforce_expiry_on_accept: true,
            strict_reject: true,
            resend_after_terminal: false,
        }
    }
}

impl OfferPolicyConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_expires_in_minutes == 0 {
            return Err(anyhow::anyhow!("邀约最长有效期必须大于0"));
        }

        if self.default_expires_in_minutes == 0
            || self.default_expires_in_minutes > self.max_expires_in_minutes
        {
            return Err(anyhow::anyhow!(
                "默认邀约有效期必须位于 1..={} 分钟",
                self.max_expires_in_minutes
            ));
        }

        Ok(())
    }
}
