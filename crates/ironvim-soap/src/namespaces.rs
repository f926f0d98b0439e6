pub const SOAP_ENVELOPE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const VIM25: &str = "urn:vim25";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub const SOAP_ENVELOPE_ALIAS: &str = "soapenv";
pub const XSD_ALIAS: &str = "xsd";
pub const XSI_ALIAS: &str = "xsi";
