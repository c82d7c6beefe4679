//! Field names used by the expert registration form and the roster sheet.

pub const NAME: &str = "专家姓名";
pub const ID_NUMBER: &str = "身份证号";
pub const BANK: &str = "开户银行";
pub const BANK_ACCOUNT: &str = "银行账户";
pub const PHONE: &str = "手机号";

pub const DOCUMENT_TYPE: &str = "证件类型";
pub const NATIONALITY: &str = "国籍";
pub const SEX: &str = "性别";
pub const BIRTH_DATE: &str = "出生日期";
