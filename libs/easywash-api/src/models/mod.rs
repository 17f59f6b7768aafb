//! API models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// API version sent with content requests
pub const API_VERSION: &str = "0.0.1";

/// `typ` label the service uses for washing machines
pub const WASHER_LABEL: &str = "Waschmaschine";

// ================================ REQUESTS ================================== //

/// Outer request envelope: `{"request": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiRequest {
    pub request: RequestContent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestContent {
    pub head: RequestHead,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestHead {
    pub credentials: RequestCredentials,

    pub requesttype: RequestType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
}

/// Either a login pair or an issued token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestCredentials {
    Login { user: String, pass: String },
    Token { token: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestType {
    #[serde(rename = "authentication")]
    Authentication,
    #[serde(rename = "getRaum")]
    GetRoom,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestBody {
    pub parameter: RoomParameter,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomParameter {
    /// Room number, sent as a string
    pub raumnr: String,
}

impl ApiRequest {
    /// Login request exchanging user and password for a token
    pub fn authentication(user: &str, pass: &str) -> Self {
        Self {
            request: RequestContent {
                head: RequestHead {
                    credentials: RequestCredentials::Login {
                        user: user.to_string(),
                        pass: pass.to_string(),
                    },
                    requesttype: RequestType::Authentication,
                    api: None,
                },
                body: None,
            },
        }
    }

    /// Room state request
    pub fn get_room(token: &str, api_version: &str, room_number: u32) -> Self {
        Self {
            request: RequestContent {
                head: RequestHead {
                    credentials: RequestCredentials::Token {
                        token: token.to_string(),
                    },
                    requesttype: RequestType::GetRoom,
                    api: Some(api_version.to_string()),
                },
                body: Some(RequestBody {
                    parameter: RoomParameter {
                        raumnr: room_number.to_string(),
                    },
                }),
            },
        }
    }
}

// ================================ RESPONSES ================================= //

/// Authentication response: `result.head.credentials.token`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub result: AuthResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResult {
    pub head: AuthHead,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthHead {
    pub credentials: IssuedCredentials,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuedCredentials {
    pub token: String,
}

/// Room response: `result.body.objekt.raum`
#[derive(Debug, Clone, Deserialize)]
pub struct RoomResponse {
    pub result: RoomResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomResult {
    pub body: RoomBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomBody {
    pub objekt: RoomObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomObject {
    pub raum: Room,
}

/// A laundry room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    /// Display name
    pub bezeichnung: String,

    /// Machines in service order
    #[serde(default)]
    pub maschinen: Vec<Machine>,
}

/// A single washer or dryer as reported by the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Machine {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,

    /// Number printed on the machine
    #[serde(deserialize_with = "lenient::text")]
    pub mnr: String,

    /// Type label, e.g. "Waschmaschine" or "Trockner"
    pub typ: String,

    /// -1 no data, 0 off, 1 on
    #[serde(deserialize_with = "lenient::int")]
    pub status: i64,

    /// Index into the failure table, 0 = no error
    #[serde(deserialize_with = "lenient::int")]
    pub fehler: i64,

    /// Reported remaining minutes
    #[serde(deserialize_with = "lenient::int")]
    pub restzeit: i64,

    /// Nonzero while a wash/dry cycle runs
    #[serde(deserialize_with = "lenient::int")]
    pub waschgang: i64,

    #[serde(deserialize_with = "lenient::int")]
    pub programm: i64,

    pub zeitstempel: Timestamp,

    #[serde(default, deserialize_with = "lenient::text")]
    pub positionx: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub positiony: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub positionz: String,

    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub tuer: Option<i64>,

    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub locked: Option<i64>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub solltemperatur: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub isttemperatur: Option<String>,
}

/// Last signal stamp, service-local time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timestamp {
    #[serde(
        deserialize_with = "lenient::service_time",
        serialize_with = "serialize_service_time"
    )]
    pub date: NaiveDateTime,
}

fn serialize_service_time<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&date.format("%Y-%m-%d %H:%M:%S%.6f").to_string())
}

/// Washer or dryer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineKind {
    Washer,
    Dryer,
}

impl Machine {
    /// Anything not labelled as a washing machine is treated as a dryer
    pub fn kind(&self) -> MachineKind {
        if self.typ == WASHER_LABEL {
            MachineKind::Washer
        } else {
            MachineKind::Dryer
        }
    }

    pub fn is_active(&self) -> bool {
        self.waschgang != 0
    }
}
