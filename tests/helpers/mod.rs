// ==========================================
// 集成测试辅助模块
// ==========================================

pub mod mock_store;
pub mod test_data_builder;
