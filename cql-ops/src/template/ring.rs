use std::net::IpAddr;

use crate::session::Host;

/// A member of the token ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingMember {
    /// Textual form of the member's address; no reverse DNS lookup is made.
    pub host_name: String,
    pub address: IpAddr,
    pub datacenter: Option<String>,
    pub rack: Option<String>,
}

impl From<&Host> for RingMember {
    fn from(host: &Host) -> Self {
        let address = host.address.ip();
        RingMember {
            host_name: address.to_string(),
            address,
            datacenter: host.datacenter.clone(),
            rack: host.rack.clone(),
        }
    }
}

/// Maps each host of the ring into a caller-chosen type.
pub trait HostMapper<T> {
    fn map_host(&self, host: &Host) -> T;
}

impl<T, F> HostMapper<T> for F
where
    F: Fn(&Host) -> T,
{
    fn map_host(&self, host: &Host) -> T {
        self(host)
    }
}

/// The default mapper, producing [`RingMember`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct RingMemberHostMapper;

impl HostMapper<RingMember> for RingMemberHostMapper {
    fn map_host(&self, host: &Host) -> RingMember {
        RingMember::from(host)
    }
}
