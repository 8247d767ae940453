use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Resource {
    #[default]
    #[serde(rename = "pixCashIn")]
    PixCashIn,
    #[serde(rename = "pixCashOut")]
    PixCashOut,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::PixCashIn, Resource::PixCashOut];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::PixCashIn => "pixCashIn",
            Resource::PixCashOut => "pixCashOut",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    #[default]
    CreateStaticCharge,
    CreateDynamicImmediateCharge,
    GetChargeStatus,
    PayByAccount,
    PayByEmv,
    PayByKey,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::CreateStaticCharge,
        Operation::CreateDynamicImmediateCharge,
        Operation::GetChargeStatus,
        Operation::PayByAccount,
        Operation::PayByEmv,
        Operation::PayByKey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateStaticCharge => "createStaticCharge",
            Operation::CreateDynamicImmediateCharge => "createDynamicImmediateCharge",
            Operation::GetChargeStatus => "getChargeStatus",
            Operation::PayByAccount => "payByAccount",
            Operation::PayByEmv => "payByEmv",
            Operation::PayByKey => "payByKey",
        }
    }

    /// The resource this operation belongs to.
    pub fn resource(&self) -> Resource {
        match self {
            Operation::CreateStaticCharge
            | Operation::CreateDynamicImmediateCharge
            | Operation::GetChargeStatus => Resource::PixCashIn,
            Operation::PayByAccount | Operation::PayByEmv | Operation::PayByKey => {
                Resource::PixCashOut
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or(())
    }
}

/// Raw resource/operation pair as read from an item.
///
/// Kept as text so that unknown values can still be reported back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OperationSelector {
    pub resource: String,
    pub operation: String,
}

impl OperationSelector {
    pub fn new(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            operation: operation.into(),
        }
    }

    /// Resolves the pair, `None` when either side is unknown or the operation
    /// does not belong to the resource.
    pub fn resolve(&self) -> Option<(Resource, Operation)> {
        let resource = self.resource.parse::<Resource>().ok()?;
        let operation = self.operation.parse::<Operation>().ok()?;

        if operation.resource() != resource {
            return None;
        }

        Some((resource, operation))
    }
}

impl fmt::Display for OperationSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource, self.operation)
    }
}
